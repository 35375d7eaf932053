//! Item detail lookup
//!
//! Resolves a route parameter that may be either a slug (pretty URL) or a
//! raw store identifier (legacy/direct link), slug taking priority, and
//! returns the item together with the page metadata the detail view needs.
//! Store failures surface as 500s, distinct from a genuine 404.

use axum::{
    extract::{Path, State},
    Json,
};
use gourmet_common::db::items;
use gourmet_common::model::Item;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Site name appended to page titles
const SITE_NAME: &str = "GourmetGuide";

/// Maximum page-description length before truncation
const META_DESCRIPTION_LIMIT: usize = 160;

/// Page metadata for the detail view
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(rename = "bannerImage", skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub item: Item,
    pub meta: PageMeta,
}

/// Truncate a description for page metadata, appending an ellipsis when
/// text was cut
fn meta_description(description: &str) -> String {
    if description.chars().count() <= META_DESCRIPTION_LIMIT {
        return description.to_string();
    }
    let truncated: String = description.chars().take(META_DESCRIPTION_LIMIT).collect();
    format!("{}...", truncated)
}

/// GET /items/:id (detail)
///
/// The parameter is matched as a slug first; if nothing matches and it is
/// a syntactically valid identifier, identifier lookup is tried next.
pub async fn item_detail(
    State(state): State<AppState>,
    Path(route_param): Path<String>,
) -> ApiResult<Json<DetailResponse>> {
    let item = items::resolve_item(&state.db, &route_param)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no item matching '{}'", route_param)))?;

    let meta = PageMeta {
        title: format!("{} | {}", item.title, SITE_NAME),
        description: meta_description(&item.description),
        banner_image: item.images.first().cloned(),
    };

    Ok(Json(DetailResponse { item, meta }))
}
