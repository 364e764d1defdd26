//! Header resolution and row lookup over a raw sheet grid.
//!
//! Both are rebuilt from a fresh read on every operation. Row handles they
//! produce are only meaningful until the sheet is next modified.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::models::{Cell, RowHandle};
use crate::services::error::GatewayError;

/// Column names from row 1, matched exactly (case-sensitive, untrimmed)
#[derive(Debug, Clone, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn from_grid(grid: &[Vec<Cell>]) -> Self {
        let names = grid
            .first()
            .map(|row| row.iter().map(|c| c.text().into_owned()).collect())
            .unwrap_or_default();
        Self { names }
    }

    /// Zero-based column of the first header cell equal to `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Positions of every required column, in the order given
    pub fn require<const N: usize>(
        &self,
        required: &'static [&'static str; N],
    ) -> Result<[usize; N], GatewayError> {
        let mut positions = [0; N];
        let mut missing = Vec::new();

        for (slot, name) in positions.iter_mut().zip(required) {
            match self.position(name) {
                Some(col) => *slot = col,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(positions)
        } else {
            Err(GatewayError::MissingColumns { missing, required })
        }
    }
}

/// Maps each `tweet_id` to the first row holding it
#[derive(Debug, Default)]
pub struct SheetIndex {
    first_row: HashMap<String, RowHandle>,
}

impl SheetIndex {
    pub fn build(grid: &[Vec<Cell>], id_column: usize) -> Self {
        let mut first_row = HashMap::new();
        for (handle, row) in data_rows(grid) {
            first_row
                .entry(cell_text(row, id_column).into_owned())
                .or_insert(handle);
        }
        Self { first_row }
    }

    pub fn lookup(&self, tweet_id: &str) -> Option<RowHandle> {
        self.first_row.get(tweet_id).copied()
    }
}

/// Record rows with their handles, header skipped
pub fn data_rows(grid: &[Vec<Cell>]) -> impl Iterator<Item = (RowHandle, &[Cell])> {
    grid.iter()
        .enumerate()
        .skip(1)
        .map(|(i, row)| (RowHandle::from_grid_index(i), row.as_slice()))
}

/// Text of a cell, treating cells past the end of a ragged row as blank
pub fn cell_text(row: &[Cell], column: usize) -> Cow<'_, str> {
    row.get(column)
        .map(Cell::text)
        .unwrap_or(Cow::Borrowed(""))
}
