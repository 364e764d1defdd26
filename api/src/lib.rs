//! JSON gateway over a spreadsheet used as a tweet queue.
//!
//! An external scheduler lists pending tweets, publishes them elsewhere, and
//! reports back by updating each tweet's status. Every response is a
//! `{status, message, data?}` envelope.

pub mod config;
pub mod constants;
pub mod domain;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;

use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::{Config, StoreBackend};
use constants::{MAX_REQUEST_BODY_SIZE, SHEET_HEADER};
use domain::{TweetGateway, seed::seed_sample_data};
use services::clock::Clock;
use storage::{GoogleSheetsStore, MemoryStore, SheetStore, StoreError};

pub struct AppState {
    pub gateway: TweetGateway,
    pub strict_status_codes: bool,
}

pub fn build_app(state: Arc<AppState>) -> Router {
    routes::build_routes()
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the configured backend. The memory backend starts with the
/// configured sheet holding just its header row, seeded if requested.
pub async fn build_store(
    config: &Config,
    clock: &dyn Clock,
) -> Result<Arc<dyn SheetStore>, StoreError> {
    match &config.backend {
        StoreBackend::Memory => {
            let store = MemoryStore::with_sheet(&config.gateway.sheet_name, &SHEET_HEADER);
            if config.seed_sample_data {
                seed_sample_data(&store, &config.gateway.sheet_name, clock).await?;
            }
            Ok(Arc::new(store))
        }
        StoreBackend::Google(settings) => Ok(Arc::new(GoogleSheetsStore::new(settings)?)),
    }
}
