//! Google Sheets v4 backend.
//!
//! Reads use `FORMATTED_VALUE` so every cell comes back as the text shown in
//! the sheet. Writes use `RAW` so timestamps and ids are never reinterpreted
//! as dates or numbers.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

use super::{SheetStore, StoreError};
use crate::config::GoogleSheetsSettings;
use crate::models::{Cell, RowHandle};

#[derive(Clone)]
pub struct GoogleSheetsStore {
    spreadsheet_id: String,
    access_token: String,
    api_base: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    // Omitted entirely when the sheet is blank
    #[serde(default)]
    values: Vec<Vec<Cell>>,
}

impl GoogleSheetsStore {
    pub fn new(settings: &GoogleSheetsSettings) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            spreadsheet_id: settings.spreadsheet_id.clone(),
            access_token: settings.access_token.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.api_base,
            percent_encode(&self.spreadsheet_id)
        )
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.spreadsheet_url(), percent_encode(range))
    }

    /// Turn a non-2xx response into a store error, recognising the API's
    /// answer for a range that names a missing sheet.
    async fn check(resp: Response, sheet: &str) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await?;
        if status.as_u16() == 400 && body.contains("Unable to parse range") {
            return Err(StoreError::SheetNotFound(sheet.to_string()));
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn has_sheet(&self, sheet: &str) -> Result<bool, StoreError> {
        let resp = self
            .http
            .get(self.spreadsheet_url())
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = Self::check(resp, sheet).await?.json().await?;

        Ok(meta.sheets.iter().any(|s| s.properties.title == sheet))
    }

    async fn read_rows(&self, sheet: &str) -> Result<Vec<Vec<Cell>>, StoreError> {
        let resp = self
            .http
            .get(self.values_url(&quote_sheet(sheet)))
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let range: ValueRange = Self::check(resp, sheet).await?.json().await?;

        Ok(range.values)
    }

    async fn append_row(&self, sheet: &str, row: Vec<Cell>) -> Result<(), StoreError> {
        let range = a1_cell(sheet, RowHandle::HEADER, 0);
        let body = serde_json::json!({
            "majorDimension": "ROWS",
            "values": [row.iter().map(raw_value).collect::<Vec<_>>()],
        });

        let resp = self
            .http
            .post(format!("{}:append", self.values_url(&range)))
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::check(resp, sheet).await?;

        Ok(())
    }

    async fn write_cell(
        &self,
        sheet: &str,
        row: RowHandle,
        column: usize,
        value: Cell,
    ) -> Result<(), StoreError> {
        let range = a1_cell(sheet, row, column);
        let body = serde_json::json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[raw_value(&value)]],
        });

        let resp = self
            .http
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::check(resp, sheet).await?;

        Ok(())
    }
}

fn percent_encode(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, percent_encoding::NON_ALPHANUMERIC).to_string()
}

/// Sheet name as an A1 range prefix: `My 'Sheet'` -> `'My ''Sheet'''`
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Column letters for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA
fn column_letters(column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn a1_cell(sheet: &str, row: RowHandle, column: usize) -> String {
    format!("{}!{}{}", quote_sheet(sheet), column_letters(column), row)
}

/// Blank cells must be sent as "" (a JSON null means "leave unchanged")
fn raw_value(cell: &Cell) -> serde_json::Value {
    match cell {
        Cell::Empty => serde_json::Value::String(String::new()),
        other => serde_json::to_value(other).unwrap_or(serde_json::Value::Null),
    }
}
