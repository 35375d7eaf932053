//! AI-assisted draft endpoint
//!
//! Authenticated authors can ask for a structured content draft to prefill
//! the editor. Requires a configured provider key; otherwise the endpoint
//! reports itself unavailable.

use axum::{extract::State, response::IntoResponse, Json};
use gourmet_common::model::ItemKind;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub kind: ItemKind,
    pub prompt: String,
}

/// POST /generate
pub async fn generate_draft(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<axum::response::Response> {
    let client = state
        .drafts
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("AI drafting is not configured".to_string()))?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt is required".to_string()));
    }

    let response = match request.kind {
        ItemKind::Recipe => {
            let draft = client.recipe_draft(&request.prompt).await?;
            Json(draft).into_response()
        }
        ItemKind::Restaurant => {
            let draft = client.review_draft(&request.prompt).await?;
            Json(draft).into_response()
        }
    };

    Ok(response)
}
