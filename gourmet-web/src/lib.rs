//! gourmet-web library - GourmetGuide content service
//!
//! Public gallery/detail reads, password-protected authoring, and optional
//! AI-assisted content drafting over HTTP/JSON.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::draft_client::DraftClient;

pub mod admin;
pub mod api;
pub mod error;
pub mod services;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Per-install token signing secret (settings table)
    pub token_secret: String,
    /// AI draft client; `None` when no provider key is configured
    pub drafts: Option<Arc<DraftClient>>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, token_secret: String, drafts: Option<Arc<DraftClient>>) -> Self {
        Self {
            db,
            token_secret,
            drafts,
        }
    }
}

/// Build application router
///
/// Mutating routes and AI drafting require a bearer token; the gallery
/// list, detail lookup, login and health endpoints are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{delete, get, post, put};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/items", post(api::items::create_item))
        .route("/items/:id", put(api::items::update_item))
        .route("/items/:id", delete(api::items::delete_item))
        .route("/generate", post(api::generate::generate_draft))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth::require_auth,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/items", get(api::items::list_items))
        .route("/items/:id", get(api::detail::item_detail))
        .route("/auth/login", post(api::login::login))
        .merge(api::health::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
