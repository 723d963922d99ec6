//! Google Sheets v4 values client backing the [`TabularLog`] capability.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::auth::Authenticator;
use crate::error::{ensure_success, Result};
use crate::models::ValueRange;
use crate::store::TabularLog;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Client for the values of a single spreadsheet.
pub struct SheetsClient {
    auth: Authenticator,
    http: Client,
    spreadsheet_id: String,
    api_base: String,
}

impl SheetsClient {
    pub fn new(auth: Authenticator, spreadsheet_id: impl Into<String>) -> Self {
        Self::with_base_url(auth, spreadsheet_id, SHEETS_API_BASE)
    }

    pub fn with_base_url(
        auth: Authenticator,
        spreadsheet_id: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            http: Client::new(),
            spreadsheet_id: spreadsheet_id.into(),
            api_base: api_base.into(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_base, self.spreadsheet_id, range
        )
    }
}

#[async_trait]
impl TabularLog for SheetsClient {
    async fn get(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let token = self.auth.access_token().await?;

        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(&token)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let value_range: ValueRange = response.json().await?;
        debug!("Read {} rows from {}", value_range.values.len(), range);
        Ok(value_range.values)
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let token = self.auth.access_token().await?;
        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values: rows,
        };

        let response = self
            .http
            .put(self.values_url(range))
            .bearer_auth(&token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Updated {}", range);
        Ok(())
    }

    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        let token = self.auth.access_token().await?;
        let body = ValueRange {
            values: rows,
            ..Default::default()
        };

        let response = self
            .http
            .post(format!("{}:append", self.values_url(range)))
            .bearer_auth(&token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&body)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Appended to {}", range);
        Ok(())
    }
}
