//! Content item model
//!
//! An item is either a recipe or a restaurant review. The two variants share
//! base attributes (title, description, images, timestamps) and diverge in
//! their payload, expressed as a proper sum type rather than one flat record
//! with nullable per-variant fields. The JSON shape stays flat: the variant
//! payload is flattened next to the base fields with a `type` discriminator.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Item variant discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Recipe,
    Restaurant,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Recipe => "recipe",
            ItemKind::Restaurant => "restaurant",
        }
    }
}

/// Restaurant price bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Expensive,
    #[serde(rename = "$$$$")]
    Luxury,
}

/// Variant-specific item payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemDetails {
    Recipe {
        #[serde(default)]
        ingredients: Vec<String>,
        #[serde(default)]
        instructions: Vec<String>,
        #[serde(rename = "prepTime", default)]
        prep_time: String,
    },
    Restaurant {
        rating: i64,
        location: String,
        #[serde(rename = "priceRange")]
        price_range: PriceRange,
    },
}

impl ItemDetails {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetails::Recipe { .. } => ItemKind::Recipe,
            ItemDetails::Restaurant { .. } => ItemKind::Restaurant,
        }
    }
}

/// A stored content item
///
/// `id` is the store-assigned UUIDv4 string; `slug` is unique across all
/// items and derived from the title. Both are immutable from the client's
/// perspective (the slug changes only when the title changes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl Item {
    /// Validate invariants on the assembled item
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidInput("description is required".to_string()));
        }
        if let ItemDetails::Restaurant { rating, .. } = &self.details {
            if !(1..=5).contains(rating) {
                return Err(Error::InvalidInput(format!(
                    "rating must be between 1 and 5, got {}",
                    rating
                )));
            }
        }
        Ok(())
    }

    /// Apply a partial update to this item.
    ///
    /// Base fields always apply; variant fields apply only when they match
    /// the stored variant (the discriminator itself is immutable). Identifier,
    /// slug and creation timestamp are never touched here.
    pub fn apply(&mut self, changes: &ItemChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(images) = &changes.images {
            self.images = images.clone();
        } else if let Some(image_url) = &changes.image_url {
            self.images = vec![image_url.clone()];
        }

        match &mut self.details {
            ItemDetails::Recipe {
                ingredients,
                instructions,
                prep_time,
            } => {
                if let Some(v) = &changes.ingredients {
                    *ingredients = v.clone();
                }
                if let Some(v) = &changes.instructions {
                    *instructions = v.clone();
                }
                if let Some(v) = &changes.prep_time {
                    *prep_time = v.clone();
                }
            }
            ItemDetails::Restaurant {
                rating,
                location,
                price_range,
            } => {
                if let Some(v) = changes.rating {
                    *rating = v;
                }
                if let Some(v) = &changes.location {
                    *location = v.clone();
                }
                if let Some(v) = changes.price_range {
                    *price_range = v;
                }
            }
        }
    }
}

/// Client payload for item creation.
///
/// Identifier, slug and creation timestamp are server-assigned. The
/// deprecated scalar `imageUrl` is accepted for backward compatibility and
/// folded into `images` when the latter is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl NewItem {
    /// Fold the deprecated `imageUrl` field into the image list
    pub fn into_images(self) -> (Vec<String>, String, String, ItemDetails) {
        let images = if self.images.is_empty() {
            self.image_url.into_iter().collect()
        } else {
            self.images
        };
        (images, self.title, self.description, self.details)
    }
}

/// Partial update to an item; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<String>,
    pub rating: Option<i64>,
    pub location: Option<String>,
    pub price_range: Option<PriceRange>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_recipe() -> Item {
        Item {
            id: "c2aee0a9-66bb-4bcc-aa73-07f43f473543".to_string(),
            slug: "spicy-thai-curry".to_string(),
            title: "Spicy Thai Curry".to_string(),
            description: "A fragrant curry".to_string(),
            images: vec!["https://example.com/curry.jpg".to_string()],
            created_at: 1_730_000_000_000,
            details: ItemDetails::Recipe {
                ingredients: vec!["coconut milk".to_string()],
                instructions: vec!["simmer".to_string()],
                prep_time: "30 mins".to_string(),
            },
        }
    }

    #[test]
    fn test_item_serializes_flat_with_discriminator() {
        let value = serde_json::to_value(sample_recipe()).unwrap();
        assert_eq!(value["type"], "recipe");
        assert_eq!(value["prepTime"], "30 mins");
        assert_eq!(value["createdAt"], 1_730_000_000_000i64);
        assert_eq!(value["slug"], "spicy-thai-curry");
        // No nested payload object
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_restaurant_price_range_round_trip() {
        let details: ItemDetails = serde_json::from_value(json!({
            "type": "restaurant",
            "rating": 4,
            "location": "Lisbon, Portugal",
            "priceRange": "$$$"
        }))
        .unwrap();
        assert_eq!(
            details,
            ItemDetails::Restaurant {
                rating: 4,
                location: "Lisbon, Portugal".to_string(),
                price_range: PriceRange::Expensive,
            }
        );
        let back = serde_json::to_value(&details).unwrap();
        assert_eq!(back["priceRange"], "$$$");
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let mut item = sample_recipe();
        item.details = ItemDetails::Restaurant {
            rating: 6,
            location: "Nowhere".to_string(),
            price_range: PriceRange::Moderate,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut item = sample_recipe();
        item.title = "   ".to_string();
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_apply_ignores_mismatched_variant_fields() {
        let mut item = sample_recipe();
        let changes = ItemChanges {
            rating: Some(3),
            location: Some("Oslo".to_string()),
            prep_time: Some("45 mins".to_string()),
            ..ItemChanges::default()
        };
        item.apply(&changes);
        match &item.details {
            ItemDetails::Recipe { prep_time, .. } => assert_eq!(prep_time, "45 mins"),
            other => panic!("variant changed: {:?}", other),
        }
    }

    #[test]
    fn test_apply_folds_deprecated_image_url() {
        let mut item = sample_recipe();
        let changes = ItemChanges {
            image_url: Some("https://example.com/new.jpg".to_string()),
            ..ItemChanges::default()
        };
        item.apply(&changes);
        assert_eq!(item.images, vec!["https://example.com/new.jpg".to_string()]);
    }

    #[test]
    fn test_new_item_accepts_image_url_fallback() {
        let new: NewItem = serde_json::from_value(json!({
            "title": "Burger Joint",
            "description": "Great patties",
            "imageUrl": "https://example.com/burger.jpg",
            "type": "restaurant",
            "rating": 5,
            "location": "Las Vegas, USA",
            "priceRange": "$$"
        }))
        .unwrap();
        let (images, title, _, details) = new.into_images();
        assert_eq!(images, vec!["https://example.com/burger.jpg".to_string()]);
        assert_eq!(title, "Burger Joint");
        assert_eq!(details.kind(), ItemKind::Restaurant);
    }
}
