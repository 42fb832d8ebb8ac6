//! Google Sheets record store
//!
//! Talks to the Sheets REST v4 `values` endpoints. The caller supplies an
//! OAuth access token; minting and refreshing it happens outside this crate.

use async_trait::async_trait;
use droneops_domain::Record;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info};

use crate::a1::{CellRef, RangeRef};
use crate::error::{Result, StoreError};
use crate::grid::{self, Grid};
use crate::RecordStore;

/// Default Sheets API host
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Clone)]
pub struct SheetsStore {
    client: reqwest::Client,
    api_base: String,
    spreadsheet_id: String,
    access_token: String,
}

impl fmt::Debug for SheetsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsStore")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl SheetsStore {
    pub fn new(spreadsheet_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Point the store at another host, e.g. a local mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn values_url(&self, address: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(address)
        )
    }
}

/// Map a non-success response to [`StoreError::Api`], keeping Google's message when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body);

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for SheetsStore {
    async fn read_range(&self, range: &RangeRef) -> Result<Vec<Record>> {
        let url = self.values_url(&range.to_string());

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let body: ValueRange = check_status(response).await?.json().await?;

        let grid: Grid = body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();

        let records = grid::records_from_grid(grid);
        debug!(range = %range, records = records.len(), "read sheet range");
        Ok(records)
    }

    async fn write_cell(&self, cell: &CellRef, value: &str) -> Result<()> {
        let url = self.values_url(&cell.to_string());

        let response = self
            .client
            .put(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.access_token)
            .json(&json!({ "values": [[value]] }))
            .send()
            .await?;
        check_status(response).await?;

        info!(cell = %cell, "updated sheet cell");
        Ok(())
    }
}
