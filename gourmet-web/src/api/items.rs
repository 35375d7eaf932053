//! Item CRUD handlers
//!
//! The gallery list is public; create/update/delete sit behind the bearer
//! token middleware. Slug assignment and uniqueness resolution live in the
//! store layer (`gourmet_common::db::items`).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gourmet_common::db::items;
use gourmet_common::model::{Item, ItemChanges, NewItem};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /items
///
/// All items, newest first.
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    let items = items::list_items(&state.db).await?;
    Ok(Json(items))
}

/// POST /items
///
/// Validates the payload, derives and resolves the slug from the title,
/// assigns identifier and creation timestamp server-side.
pub async fn create_item(
    State(state): State<AppState>,
    Json(new): Json<NewItem>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let item = items::insert_item(&state.db, new).await?;
    info!(id = %item.id, slug = %item.slug, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/:id
///
/// Partial update. The slug is recomputed only when the update carries a
/// title different from the stored one; 404 for unknown identifiers.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<ItemChanges>,
) -> ApiResult<Json<Item>> {
    let updated = items::update_item(&state.db, &id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no item with id '{}'", id)))?;

    info!(id = %updated.id, slug = %updated.slug, "item updated");
    Ok(Json(updated))
}

/// DELETE /items/:id
///
/// Idempotent removal: succeeds whether or not the item existed.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    items::delete_item(&state.db, &id).await?;
    info!(id = %id, "item deleted");
    Ok(Json(json!({ "success": true })))
}
