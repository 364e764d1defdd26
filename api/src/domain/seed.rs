//! Sample rows for trying the gateway against a fresh sheet.

use crate::constants::SHEET_HEADER;
use crate::models::Cell;
use crate::services::clock::{Clock, storage_timestamp};
use crate::storage::{SheetStore, StoreError};

const SAMPLE_TWEETS: [(&str, &str, &str); 3] = [
    (
        "sample-uuid-1",
        "Hello world! This is a sample tweet for automation testing. #automation #tech",
        "pending",
    ),
    (
        "sample-uuid-2",
        "Another sample tweet to test the cron job functionality. #testing #python",
        "pending",
    ),
    (
        "sample-uuid-3",
        "Testing the Google Sheets integration with our tweet automation system! #integration",
        "done",
    ),
];

/// Write the header if the sheet is blank, then append the sample records.
/// Returns the number of records appended.
pub async fn seed_sample_data(
    store: &dyn SheetStore,
    sheet: &str,
    clock: &dyn Clock,
) -> Result<usize, StoreError> {
    if !store.has_sheet(sheet).await? {
        return Err(StoreError::SheetNotFound(sheet.to_string()));
    }

    if store.read_rows(sheet).await?.is_empty() {
        let header = SHEET_HEADER.iter().map(|h| Cell::from(*h)).collect();
        store.append_row(sheet, header).await?;
    }

    let created_at = storage_timestamp(clock.now());
    for (tweet_id, tweet, status) in SAMPLE_TWEETS {
        let row = vec![
            Cell::from(tweet_id),
            Cell::from(tweet),
            Cell::from(status),
            Cell::from(created_at.as_str()),
            Cell::from(""),
        ];
        store.append_row(sheet, row).await?;
    }

    tracing::info!(sheet, count = SAMPLE_TWEETS.len(), "Sample data created");
    Ok(SAMPLE_TWEETS.len())
}
