pub mod dto;
pub mod tweets;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::AppState;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(tweets::routes())
        .fallback(tweets::unknown_path)
}

async fn health() -> &'static str {
    "ok"
}
