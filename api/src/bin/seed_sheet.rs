//! Append sample tweets to the configured sheet.
//!
//! Uses the same environment as the server (see `config`). Against the
//! memory backend this only proves the rows are well-formed; point
//! `STORE_BACKEND=google` at a real spreadsheet to populate it.

use tracing_subscriber::EnvFilter;

use tweet_sheet::build_store;
use tweet_sheet::config::Config;
use tweet_sheet::domain::seed::seed_sample_data;
use tweet_sheet::services::clock::SystemClock;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));
    // build_store would seed the memory backend itself; seed exactly once here
    config.seed_sample_data = false;

    let store = build_store(&config, &SystemClock)
        .await
        .unwrap_or_else(|e| panic!("Failed to open sheet store: {}", e));

    match seed_sample_data(store.as_ref(), &config.gateway.sheet_name, &SystemClock).await {
        Ok(count) => tracing::info!(
            sheet = %config.gateway.sheet_name,
            count,
            "Seeded sample tweets"
        ),
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
    }
}
