//! Tweet queue operations against the configured sheet.
//!
//! Every operation re-reads the sheet, so results reflect manual edits made
//! directly in the spreadsheet. The scan-then-write in [`TweetGateway::update_status`]
//! is not atomic: a row inserted or removed between the read and the write can
//! shift the target row.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::constants::{
    COL_CREATED_AT, COL_POSTED_AT, COL_STATUS, COL_TWEET, COL_TWEET_ID, STATUS_DONE,
    STATUS_PENDING,
};
use crate::domain::sheet::{Header, SheetIndex, cell_text, data_rows};
use crate::models::{Cell, CreatedTweet, NewTweet, PendingTweet, StatusUpdate, UpdatedStatus};
use crate::services::clock::{Clock, display_timestamp, storage_timestamp};
use crate::services::error::GatewayError;
use crate::storage::SheetStore;

const LIST_COLUMNS: [&str; 3] = [COL_TWEET_ID, COL_TWEET, COL_STATUS];
const UPDATE_COLUMNS: [&str; 2] = [COL_TWEET_ID, COL_STATUS];

#[derive(Clone)]
pub struct TweetGateway {
    store: Arc<dyn SheetStore>,
    config: GatewayConfig,
    clock: Arc<dyn Clock>,
}

impl TweetGateway {
    pub fn new(store: Arc<dyn SheetStore>, config: GatewayConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.config.sheet_name
    }

    async fn ensure_sheet(&self, context: &'static str) -> Result<(), GatewayError> {
        let sheet = self.sheet_name();
        let exists = self
            .store
            .has_sheet(sheet)
            .await
            .map_err(GatewayError::from_store(context))?;
        if !exists {
            return Err(GatewayError::TableNotFound(sheet.to_string()));
        }
        Ok(())
    }

    /// Read the configured sheet, failing with `TableNotFound` when absent
    async fn load_grid(&self, context: &'static str) -> Result<Vec<Vec<Cell>>, GatewayError> {
        self.ensure_sheet(context).await?;
        self.store
            .read_rows(self.sheet_name())
            .await
            .map_err(GatewayError::from_store(context))
    }

    /// Records whose status is `pending` (trimmed, any case), in sheet order
    pub async fn list_pending(&self) -> Result<Vec<PendingTweet>, GatewayError> {
        let grid = self.load_grid("Error fetching tweets").await?;
        let header = Header::from_grid(&grid);
        let [id_col, tweet_col, status_col] = header.require(&LIST_COLUMNS)?;
        let created_col = header.position(COL_CREATED_AT);

        let pending = data_rows(&grid)
            .filter(|(_, row)| {
                cell_text(row, status_col).trim().to_lowercase() == STATUS_PENDING
            })
            .map(|(row_number, row)| PendingTweet {
                tweet_id: cell_text(row, id_col).into_owned(),
                tweet: cell_text(row, tweet_col).into_owned(),
                status: cell_text(row, status_col).into_owned(),
                created_at: created_col.map(|col| {
                    display_timestamp(&cell_text(row, col), self.config.display_timezone)
                }),
                row_number,
            })
            .collect();

        Ok(pending)
    }

    /// Append a record. Duplicate ids are accepted and produce a second row.
    pub async fn insert_record(&self, tweet: NewTweet) -> Result<CreatedTweet, GatewayError> {
        let context = "Error adding tweet";
        self.ensure_sheet(context).await?;

        let created_at = storage_timestamp(self.clock.now());
        let row = vec![
            Cell::from(tweet.tweet_id.as_str()),
            Cell::from(tweet.tweet.as_str()),
            Cell::from(tweet.status.as_str()),
            Cell::from(created_at.as_str()),
            Cell::from(""),
        ];
        self.store
            .append_row(self.sheet_name(), row)
            .await
            .map_err(GatewayError::from_store(context))?;

        tracing::info!(tweet_id = %tweet.tweet_id, status = %tweet.status, "Tweet added");

        Ok(CreatedTweet {
            tweet_id: tweet.tweet_id,
            tweet: tweet.tweet,
            status: tweet.status,
            created_at: display_timestamp(&created_at, self.config.display_timezone),
        })
    }

    /// Set the status of the first row with a matching id, stamping
    /// `posted_at` when the new status is `done`.
    pub async fn update_status(&self, update: StatusUpdate) -> Result<UpdatedStatus, GatewayError> {
        let context = "Error updating tweet";
        let grid = self.load_grid(context).await?;
        let header = Header::from_grid(&grid);
        let [id_col, status_col] = header.require(&UPDATE_COLUMNS)?;
        let posted_col = header.position(COL_POSTED_AT);

        let row = SheetIndex::build(&grid, id_col)
            .lookup(&update.tweet_id)
            .ok_or_else(|| GatewayError::RecordNotFound(update.tweet_id.clone()))?;

        let sheet = self.sheet_name();
        self.store
            .write_cell(sheet, row, status_col, Cell::from(update.status.as_str()))
            .await
            .map_err(GatewayError::from_store(context))?;

        if update.status.to_lowercase() == STATUS_DONE {
            if let Some(col) = posted_col {
                let posted_at = storage_timestamp(self.clock.now());
                self.store
                    .write_cell(sheet, row, col, Cell::from(posted_at))
                    .await
                    .map_err(GatewayError::from_store(context))?;
            }
        }

        tracing::info!(tweet_id = %update.tweet_id, status = %update.status, row = %row, "Tweet status updated");

        Ok(UpdatedStatus {
            tweet_id: update.tweet_id,
            status: update.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SHEET_HEADER;
    use crate::models::RowHandle;
    use crate::services::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    const SHEET: &str = "Tweets";

    fn gateway_for(store: &MemoryStore) -> TweetGateway {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 19, 4, 30, 0).unwrap());
        TweetGateway::new(
            Arc::new(store.clone()),
            GatewayConfig::default(),
            Arc::new(clock),
        )
    }

    fn new_tweet(id: &str, text: &str) -> NewTweet {
        NewTweet {
            tweet_id: id.into(),
            tweet: text.into(),
            status: STATUS_PENDING.into(),
        }
    }

    fn update(id: &str, status: &str) -> StatusUpdate {
        StatusUpdate {
            tweet_id: id.into(),
            status: status.into(),
        }
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    async fn rows(store: &MemoryStore) -> Vec<Vec<Cell>> {
        store.snapshot(SHEET).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_sheet_lists_nothing() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let pending = gateway_for(&store).list_pending().await.unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_insert_appends_row_with_utc_timestamp() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let created = gateway_for(&store)
            .insert_record(new_tweet("t1", "hello"))
            .await
            .unwrap();

        assert_eq!(created.status, "pending");
        assert_eq!(created.created_at, "19/10/2026, 10:00:00 am");
        assert_eq!(
            rows(&store).await[1],
            row(&["t1", "hello", "pending", "2026-10-19T04:30:00Z", ""])
        );
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let gateway = gateway_for(&store);

        gateway.insert_record(new_tweet("t1", "hello")).await.unwrap();

        let pending = gateway.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].tweet_id, "t1");
        assert_eq!(pending[0].tweet, "hello");
        assert_eq!(pending[0].status, "pending");
        assert_eq!(pending[0].row_number, RowHandle::from_grid_index(1));
        assert_eq!(pending[0].created_at.as_deref(), Some("19/10/2026, 10:00:00 am"));

        let updated = gateway.update_status(update("t1", "done")).await.unwrap();
        assert_eq!(
            updated,
            UpdatedStatus {
                tweet_id: "t1".into(),
                status: "done".into(),
            }
        );
        assert_eq!(rows(&store).await[1][4], Cell::from("2026-10-19T04:30:00Z"));

        assert!(gateway.list_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_match_ignores_case_and_whitespace() {
        let store = MemoryStore::with_rows(
            SHEET,
            vec![
                row(&SHEET_HEADER),
                row(&["a", "one", "Pending", "", ""]),
                row(&["b", "two", "done", "", ""]),
                row(&["c", "three", " PENDING ", "", ""]),
                row(&["d", "four", "pending later", "", ""]),
            ],
        );
        let pending = gateway_for(&store).list_pending().await.unwrap();

        let ids: Vec<_> = pending.iter().map(|p| p.tweet_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(pending[1].status, " PENDING ");
        assert_eq!(pending[1].row_number.get(), 4);
    }

    #[tokio::test]
    async fn test_created_at_is_optional_for_listing() {
        let store = MemoryStore::with_rows(
            SHEET,
            vec![row(&["tweet_id", "tweet", "status"]), row(&["a", "one", "pending"])],
        );
        let pending = gateway_for(&store).list_pending().await.unwrap();
        assert_eq!(pending[0].created_at, None);
    }

    #[tokio::test]
    async fn test_listing_requires_core_columns() {
        let store = MemoryStore::with_rows(SHEET, vec![row(&["tweet_id", "text", "status"])]);
        let err = gateway_for(&store).list_pending().await.unwrap_err();
        assert!(err.to_string().contains("tweet"));
        assert!(matches!(err, GatewayError::MissingColumns { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_ids_update_first_row_only() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let gateway = gateway_for(&store);
        gateway.insert_record(new_tweet("dup", "first")).await.unwrap();
        gateway.insert_record(new_tweet("dup", "second")).await.unwrap();
        assert_eq!(rows(&store).await.len(), 3);

        gateway.update_status(update("dup", "failed")).await.unwrap();

        let grid = rows(&store).await;
        assert_eq!(grid[1][2], Cell::from("failed"));
        assert_eq!(grid[2][2], Cell::from("pending"));
    }

    #[tokio::test]
    async fn test_failed_leaves_posted_at_empty() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let gateway = gateway_for(&store);
        gateway.insert_record(new_tweet("t1", "hello")).await.unwrap();

        gateway.update_status(update("t1", "failed")).await.unwrap();

        let grid = rows(&store).await;
        assert_eq!(grid[1][2], Cell::from("failed"));
        assert_eq!(grid[1][4], Cell::from(""));
    }

    #[tokio::test]
    async fn test_done_in_any_case_stamps_posted_at() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let gateway = gateway_for(&store);
        gateway.insert_record(new_tweet("t1", "hello")).await.unwrap();

        gateway.update_status(update("t1", "DONE")).await.unwrap();

        let grid = rows(&store).await;
        assert_eq!(grid[1][2], Cell::from("DONE"));
        assert!(!grid[1][4].is_blank());
    }

    #[tokio::test]
    async fn test_done_without_posted_at_column_only_sets_status() {
        let store = MemoryStore::with_rows(
            SHEET,
            vec![row(&["tweet_id", "tweet", "status"]), row(&["t1", "hello", "pending"])],
        );
        gateway_for(&store)
            .update_status(update("t1", "done"))
            .await
            .unwrap();
        assert_eq!(rows(&store).await[1], row(&["t1", "hello", "done"]));
    }

    #[tokio::test]
    async fn test_unknown_id_reports_and_leaves_sheet_alone() {
        let store = MemoryStore::with_sheet(SHEET, &SHEET_HEADER);
        let gateway = gateway_for(&store);
        gateway.insert_record(new_tweet("t1", "hello")).await.unwrap();
        let before = rows(&store).await;

        let err = gateway.update_status(update("nope", "done")).await.unwrap_err();

        assert_eq!(err.to_string(), "Tweet with ID nope not found");
        assert_eq!(rows(&store).await, before);
    }

    #[tokio::test]
    async fn test_numeric_ids_match_by_text() {
        let store = MemoryStore::with_rows(
            SHEET,
            vec![
                row(&SHEET_HEADER),
                vec![
                    Cell::from(12345),
                    Cell::from("numeric"),
                    Cell::from("pending"),
                    Cell::Empty,
                    Cell::Empty,
                ],
            ],
        );
        let gateway = gateway_for(&store);
        gateway.update_status(update("12345", "done")).await.unwrap();
        assert_eq!(rows(&store).await[1][2], Cell::from("done"));
    }

    #[tokio::test]
    async fn test_missing_sheet_is_named_by_every_operation() {
        let store = MemoryStore::new();
        let gateway = gateway_for(&store);

        let list = gateway.list_pending().await.unwrap_err();
        let insert = gateway
            .insert_record(new_tweet("t1", "hello"))
            .await
            .unwrap_err();
        let updated = gateway.update_status(update("t1", "done")).await.unwrap_err();

        for err in [list, insert, updated] {
            assert!(matches!(err, GatewayError::TableNotFound(_)));
            assert!(err.to_string().contains("Tweets"));
        }
    }
}
