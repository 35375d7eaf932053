//! Content item storage
//!
//! Implements the slug-assignment pipeline (derive base slug, resolve
//! uniqueness against the store, write with a bounded retry on the slug
//! UNIQUE constraint) and the two-phase slug-or-identifier lookup used by
//! the detail route.

use crate::model::{Item, ItemChanges, ItemDetails, NewItem};
use crate::slug::{slugify, suffixed};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::warn;
use uuid::Uuid;

/// Upper bound on write retries after a slug unique-constraint violation.
///
/// Each retry re-runs uniqueness resolution, so losing the race to another
/// writer picks up the winner's slug on the next pass. Exhaustion means the
/// store is churning faster than we can follow; surface a conflict.
const MAX_SLUG_ATTEMPTS: u32 = 3;

/// Fallback base for titles that slugify to nothing (e.g. "!!!")
const EMPTY_SLUG_FALLBACK: &str = "item";

type ItemRow = (String, String, String, String, String, i64, String);

fn row_to_item(row: ItemRow) -> Result<Item> {
    let (id, slug, title, description, images, created_at, payload) = row;

    let images: Vec<String> = serde_json::from_str(&images)
        .map_err(|e| Error::Internal(format!("corrupt image list for item {}: {}", id, e)))?;
    let details: ItemDetails = serde_json::from_str(&payload)
        .map_err(|e| Error::Internal(format!("corrupt payload for item {}: {}", id, e)))?;

    Ok(Item {
        id,
        slug,
        title,
        description,
        images,
        created_at,
        details,
    })
}

const ITEM_COLUMNS: &str = "guid, slug, title, description, images, created_at, payload";

/// List all items, newest first
pub async fn list_items(pool: &SqlitePool) -> Result<Vec<Item>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!(
        "SELECT {} FROM items ORDER BY created_at DESC, rowid DESC",
        ITEM_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(row_to_item).collect()
}

/// Find an item by its exact slug
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Item>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!(
        "SELECT {} FROM items WHERE slug = ?",
        ITEM_COLUMNS
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    row.map(row_to_item).transpose()
}

/// Find an item by its store identifier
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Item>> {
    let row: Option<ItemRow> = sqlx::query_as(&format!(
        "SELECT {} FROM items WHERE guid = ?",
        ITEM_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(row_to_item).transpose()
}

/// Resolve a detail-route parameter to an item.
///
/// Slug match first; if none and the parameter parses as a UUID, fall back
/// to identifier lookup. Slugs (hyphenated lowercase words) and identifiers
/// (UUIDv4 strings) are assumed disjoint by construction, but this is a
/// documented assumption, not enforced.
///
/// Store errors propagate; absence and connectivity failure are distinct.
pub async fn resolve_item(pool: &SqlitePool, route_param: &str) -> Result<Option<Item>> {
    if let Some(item) = find_by_slug(pool, route_param).await? {
        return Ok(Some(item));
    }

    if Uuid::parse_str(route_param).is_ok() {
        return find_by_id(pool, route_param).await;
    }

    Ok(None)
}

/// Check whether a slug is already taken, optionally ignoring one item
/// (the item being updated).
pub async fn slug_in_use(
    pool: &SqlitePool,
    candidate: &str,
    exclude_id: Option<&str>,
) -> Result<bool> {
    let count: i64 = match exclude_id {
        Some(id) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE slug = ? AND guid <> ?")
                .bind(candidate)
                .bind(id)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE slug = ?")
                .bind(candidate)
                .fetch_one(pool)
                .await?
        }
    };

    Ok(count > 0)
}

/// Resolve a base slug to one not currently in use.
///
/// Starts with the base itself, then `base-1`, `base-2`, ... — the first
/// collision yields `base-1`. One existence query per iteration; terminates
/// because the counter strictly increases and the store is finite. Store
/// errors propagate rather than being treated as "no conflict".
pub async fn resolve_unique_slug(
    pool: &SqlitePool,
    base: &str,
    exclude_id: Option<&str>,
) -> Result<String> {
    let mut candidate = base.to_string();
    let mut counter: u32 = 1;

    while slug_in_use(pool, &candidate, exclude_id).await? {
        candidate = suffixed(base, counter);
        counter += 1;
    }

    Ok(candidate)
}

/// Derive the base slug for a title, substituting a fallback for titles
/// that slugify to the empty string so stored slugs are never empty.
fn base_slug(title: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        EMPTY_SLUG_FALLBACK.to_string()
    } else {
        base
    }
}

fn is_slug_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("items.slug"),
        _ => false,
    }
}

/// Decide what to do with a failed slug-bearing write.
///
/// A slug unique-constraint violation means a concurrent writer took the
/// candidate between resolution and the write: `Ok(())` while retry budget
/// remains, `Error::Conflict` once it is spent. Anything else propagates
/// unchanged.
fn slug_write_error(err: sqlx::Error, attempt: u32, base: &str) -> Result<()> {
    if !is_slug_conflict(&err) {
        return Err(err.into());
    }
    if attempt < MAX_SLUG_ATTEMPTS {
        warn!(base, attempt, "slug taken concurrently, retrying");
        Ok(())
    } else {
        Err(Error::Conflict(format!(
            "could not assign a unique slug for '{}'",
            base
        )))
    }
}

/// Insert a new item, assigning identifier, creation timestamp and a unique
/// slug derived from the title.
pub async fn insert_item(pool: &SqlitePool, new: NewItem) -> Result<Item> {
    let (images, title, description, details) = new.into_images();

    let mut item = Item {
        id: Uuid::new_v4().to_string(),
        slug: String::new(),
        title,
        description,
        images,
        created_at: chrono::Utc::now().timestamp_millis(),
        details,
    };
    item.validate()?;

    let base = base_slug(&item.title);
    let images_json = serde_json::to_string(&item.images)
        .map_err(|e| Error::Internal(format!("failed to encode image list: {}", e)))?;
    let payload_json = serde_json::to_string(&item.details)
        .map_err(|e| Error::Internal(format!("failed to encode item payload: {}", e)))?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        item.slug = resolve_unique_slug(pool, &base, None).await?;

        let result = sqlx::query(
            "INSERT INTO items (guid, slug, kind, title, description, images, created_at, payload) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.slug)
        .bind(item.details.kind().as_str())
        .bind(&item.title)
        .bind(&item.description)
        .bind(&images_json)
        .bind(item.created_at)
        .bind(&payload_json)
        .execute(pool)
        .await;

        match result {
            Ok(_) => return Ok(item),
            Err(e) => slug_write_error(e, attempt, &base)?,
        }
    }
}

/// Apply a partial update to an item.
///
/// Returns `Ok(None)` when the identifier is unknown. The slug is recomputed
/// only when the update carries a title that differs from the stored one;
/// the item itself is excluded from the collision check so re-saving an
/// unchanged title never moves the slug.
pub async fn update_item(
    pool: &SqlitePool,
    id: &str,
    changes: &ItemChanges,
) -> Result<Option<Item>> {
    let Some(mut item) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let title_changed = changes
        .title
        .as_deref()
        .is_some_and(|title| title != item.title);

    item.apply(changes);
    item.validate()?;

    let images_json = serde_json::to_string(&item.images)
        .map_err(|e| Error::Internal(format!("failed to encode image list: {}", e)))?;
    let payload_json = serde_json::to_string(&item.details)
        .map_err(|e| Error::Internal(format!("failed to encode item payload: {}", e)))?;

    let base = base_slug(&item.title);
    let mut attempt = 0;
    loop {
        attempt += 1;
        if title_changed {
            item.slug = resolve_unique_slug(pool, &base, Some(id)).await?;
        }

        let result = sqlx::query(
            "UPDATE items SET slug = ?, title = ?, description = ?, images = ?, payload = ? \
             WHERE guid = ?",
        )
        .bind(&item.slug)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&images_json)
        .bind(&payload_json)
        .bind(id)
        .execute(pool)
        .await;

        match result {
            Ok(_) => return Ok(Some(item)),
            Err(e) => slug_write_error(e, attempt, &base)?,
        }
    }
}

/// Delete an item by identifier. Idempotent: deleting an unknown identifier
/// succeeds.
pub async fn delete_item(pool: &SqlitePool, id: &str) -> Result<()> {
    sqlx::query("DELETE FROM items WHERE guid = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
