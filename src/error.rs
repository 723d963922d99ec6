//! Error types for the drive_ledger crate.

use reqwest::Response;
use thiserror::Error;

use crate::models::ApiErrorResponse;

/// Errors that can occur while syncing uploads to Drive and Sheets.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Invalid client secret file: {0}")]
    InvalidClientSecrets(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("Unsupported local file name: {0}")]
    InvalidFileName(String),

    #[error("Failed to walk upload directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SyncError {
    /// Turn a non-success response into an `Api` error, preferring Google's
    /// structured error body over the raw text.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => SyncError::Api {
                status: api_error.error.code,
                message: api_error.error.message,
            },
            Err(_) => SyncError::Api {
                status: status.as_u16(),
                message: body,
            },
        }
    }
}

/// Pass a successful response through, or convert it into a `SyncError`.
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(SyncError::from_response(response).await)
    }
}

/// Result type alias for SyncError.
pub type Result<T> = std::result::Result<T, SyncError>;
