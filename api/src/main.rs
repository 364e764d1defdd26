use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tweet_sheet::config::Config;
use tweet_sheet::domain::TweetGateway;
use tweet_sheet::services::clock::SystemClock;
use tweet_sheet::{AppState, build_app, build_store};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    let clock = Arc::new(SystemClock);
    let store = build_store(&config, clock.as_ref())
        .await
        .unwrap_or_else(|e| panic!("Failed to open sheet store: {}", e));

    tracing::info!(
        sheet = %config.gateway.sheet_name,
        backend = config.backend_name(),
        timezone = config.gateway.display_timezone.name(),
        strict_status_codes = config.strict_status_codes,
        "Starting tweet sheet gateway"
    );

    let state = Arc::new(AppState {
        gateway: TweetGateway::new(store, config.gateway.clone(), clock),
        strict_status_codes: config.strict_status_codes,
    });
    let app = build_app(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.expect("Server failed");
}
