//! Shared data models used across modules

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single value in the sheet grid.
///
/// Stores hand back whatever they hold; comparisons against request input
/// always go through [`Cell::text`], so a numeric cell `42` matches the id `"42"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Cell {
    /// String rendering of the cell, empty for blank cells
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Number(n) => Cow::Owned(n.to_string()),
            Cell::Bool(b) => Cow::Owned(b.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

#[cfg(test)]
impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n.into())
    }
}

/// 1-based row position in the sheet (header = row 1, first record = row 2).
///
/// Only valid for the grid it was computed from; a concurrent insert or
/// manual edit can shift rows before the handle is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowHandle(usize);

impl RowHandle {
    pub const HEADER: RowHandle = RowHandle(1);

    /// Handle for the `index`-th row of the raw grid (0 = header)
    pub fn from_grid_index(index: usize) -> Self {
        RowHandle(index + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Position of this row in a zero-based grid
    pub fn grid_index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for appending a record
#[derive(Debug, Clone, PartialEq)]
pub struct NewTweet {
    pub tweet_id: String,
    pub tweet: String,
    pub status: String,
}

/// Validated input for a status transition
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub tweet_id: String,
    pub status: String,
}

/// A record awaiting publication, as returned by the list operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingTweet {
    pub tweet_id: String,
    pub tweet: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub row_number: RowHandle,
}

/// Echo of a freshly appended record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedTweet {
    pub tweet_id: String,
    pub tweet: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedStatus {
    pub tweet_id: String,
    pub status: String,
}
