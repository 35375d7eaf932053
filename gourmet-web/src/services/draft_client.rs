//! Generative-AI draft client
//!
//! Calls the Gemini generateContent API with prompts that demand a
//! structured JSON reply and parses it into typed content drafts. The
//! provider is an external collaborator: its failures surface as upstream
//! errors and never take the service down.

use gourmet_common::model::PriceRange;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Draft client errors
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error {0}: {1}")]
    ApiError(u16, String),

    #[error("Provider returned no content")]
    EmptyResponse,

    #[error("Failed to parse provider output: {0}")]
    ParseError(String),
}

/// AI-drafted recipe content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(rename = "prepTime", default)]
    pub prep_time: String,
}

/// AI-drafted restaurant review content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini draft client
pub struct DraftClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl DraftClient {
    pub fn new(api_key: String) -> Result<Self, DraftError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| DraftError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    /// Draft a recipe for the given subject
    pub async fn recipe_draft(&self, subject: &str) -> Result<RecipeDraft, DraftError> {
        let prompt = format!(
            "Generate a recipe for \"{}\". Return ONLY valid JSON format with keys: \
             title, description, ingredients (array of strings), instructions \
             (array of strings), prepTime.",
            subject
        );
        let text = self.generate_json(&prompt).await?;
        serde_json::from_str(&text).map_err(|e| DraftError::ParseError(e.to_string()))
    }

    /// Draft a restaurant review for the given subject
    pub async fn review_draft(&self, subject: &str) -> Result<ReviewDraft, DraftError> {
        let prompt = format!(
            "Write a restaurant review for \"{}\". Return ONLY valid JSON format with \
             keys: title, description, location (city/country), priceRange ($$ or $$$ \
             or $$$$). Assume a high quality restaurant.",
            subject
        );
        let text = self.generate_json(&prompt).await?;
        serde_json::from_str(&text).map_err(|e| DraftError::ParseError(e.to_string()))
    }

    /// Run one generateContent call and return the first candidate's text
    async fn generate_json(&self, prompt: &str) -> Result<String, DraftError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE_URL, GEMINI_MODEL, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        debug!(model = GEMINI_MODEL, "requesting AI draft");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DraftError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DraftError::ApiError(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DraftError::ParseError(e.to_string()))?;

        parsed
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    candidates.remove(0).content
                }
            })
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(DraftError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_draft_parses_provider_json() {
        let json = r#"{
            "title": "Spicy Thai Green Curry",
            "description": "A fragrant curry with green chilies.",
            "ingredients": ["coconut milk", "green curry paste"],
            "instructions": ["Fry the paste", "Add coconut milk"],
            "prepTime": "35 mins"
        }"#;

        let draft: RecipeDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.title, "Spicy Thai Green Curry");
        assert_eq!(draft.ingredients.len(), 2);
        assert_eq!(draft.prep_time, "35 mins");
    }

    #[test]
    fn test_review_draft_parses_provider_json() {
        let json = r#"{
            "title": "Gordon Ramsay Burger",
            "description": "Premium burgers on the strip.",
            "location": "Las Vegas, USA",
            "priceRange": "$$$"
        }"#;

        let draft: ReviewDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.price_range, PriceRange::Expensive);
    }

    #[test]
    fn test_candidate_extraction_shape() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "{\"ok\":true}" } ] } }
            ]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .and_then(|mut c| c.remove(0).content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
            .unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }
}
