use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{SheetStore, StoreError};
use crate::models::{Cell, RowHandle};

type Grid = Vec<Vec<Cell>>;

/// In-process workbook. Clones share the same sheets.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sheets: Arc<RwLock<HashMap<String, Grid>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbook with one sheet holding only a header row
    pub fn with_sheet(name: &str, header: &[&str]) -> Self {
        let header_row = header.iter().map(|h| Cell::from(*h)).collect();
        Self::with_rows(name, vec![header_row])
    }

    pub fn with_rows(name: &str, rows: Grid) -> Self {
        let mut sheets = HashMap::new();
        sheets.insert(name.to_string(), rows);
        Self {
            sheets: Arc::new(RwLock::new(sheets)),
        }
    }

    /// Create (or replace) a sheet
    #[cfg(test)]
    pub async fn put_sheet(&self, name: &str, rows: Grid) {
        self.sheets.write().await.insert(name.to_string(), rows);
    }

    /// Copy of a sheet's current grid
    #[cfg(test)]
    pub async fn snapshot(&self, name: &str) -> Option<Grid> {
        self.sheets.read().await.get(name).cloned()
    }
}

#[async_trait]
impl SheetStore for MemoryStore {
    async fn has_sheet(&self, sheet: &str) -> Result<bool, StoreError> {
        Ok(self.sheets.read().await.contains_key(sheet))
    }

    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Cell>>, StoreError> {
        self.sheets
            .read()
            .await
            .get(sheet)
            .cloned()
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))
    }

    async fn append_row(&self, sheet: &str, row: Vec<Cell>) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write().await;
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        grid.push(row);
        Ok(())
    }

    async fn write_cell(
        &self,
        sheet: &str,
        row: RowHandle,
        column: usize,
        value: Cell,
    ) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write().await;
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        let cells = grid
            .get_mut(row.grid_index())
            .ok_or_else(|| StoreError::RowOutOfRange {
                sheet: sheet.to_string(),
                row,
            })?;

        // Ragged rows grow to reach the target column
        if cells.len() <= column {
            cells.resize(column + 1, Cell::Empty);
        }
        cells[column] = value;
        Ok(())
    }
}
