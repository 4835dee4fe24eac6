//! Google Sheets values-API record store.
//!
//! The worker table is one sheet with positional columns
//! `[id, full_name, phone, bank, receiver]`. Row numbers are derived from
//! position on every read; the id column is written for the humans looking
//! at the spreadsheet but never trusted on the way back in.

use payday::{NewWorker, RecordStore, StoreError, WorkerRecord};
use serde::Deserialize;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsStore {
    client: reqwest::Client,
    spreadsheet_id: String,
    range: String,
    access_token: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    pub fn new(spreadsheet_id: String, range: String, access_token: String) -> Self {
        SheetsStore {
            client: reqwest::Client::new(),
            spreadsheet_id,
            range,
            access_token,
        }
    }

    fn values_url(&self, suffix: &str) -> String {
        format!(
            "{API_BASE}/{}/values/{}{suffix}",
            self.spreadsheet_id, self.range
        )
    }
}

fn unavailable(e: reqwest::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl RecordStore for SheetsStore {
    async fn read_all(&self) -> Result<Vec<WorkerRecord>, StoreError> {
        let range: ValueRange = self
            .client
            .get(self.values_url(""))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        Ok(range
            .values
            .iter()
            .enumerate()
            .map(|(i, cells)| WorkerRecord::from_cells(i as u32 + 1, cells))
            .collect())
    }

    async fn append_worker(&self, worker: &NewWorker) -> Result<u32, StoreError> {
        // Next id = current row count + 1, same as the sheet's append order.
        let row = self.read_all().await?.len() as u32 + 1;

        let body = serde_json::json!({ "values": [worker.to_cells(row)] });
        self.client
            .post(self.values_url(":append?valueInputOption=RAW"))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        tracing::debug!(row, "appended worker row to spreadsheet");
        Ok(row)
    }
}
