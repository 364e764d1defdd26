//! Application constants

/// Sheet the gateway operates on when `SHEET_NAME` is unset
pub const DEFAULT_SHEET_NAME: &str = "Tweets";

/// Zone used to render timestamps in responses when `DISPLAY_TIMEZONE` is unset
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "Asia/Kolkata";

/// Google Sheets REST endpoint
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Request timeout for the Sheets backend in seconds
pub const DEFAULT_SHEETS_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body (64 KB)
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;

pub const COL_TWEET_ID: &str = "tweet_id";
pub const COL_TWEET: &str = "tweet";
pub const COL_STATUS: &str = "status";
pub const COL_CREATED_AT: &str = "created_at";
pub const COL_POSTED_AT: &str = "posted_at";

/// Header written to a fresh sheet, in column order
pub const SHEET_HEADER: [&str; 5] = [
    COL_TWEET_ID,
    COL_TWEET,
    COL_STATUS,
    COL_CREATED_AT,
    COL_POSTED_AT,
];

/// Status given to records inserted without one
pub const STATUS_PENDING: &str = "pending";

/// Status that stamps `posted_at` when applied
pub const STATUS_DONE: &str = "done";
