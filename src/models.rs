//! Data models for Drive and Sheets payloads, plus the values the sync
//! components hand to each other.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Metadata for a file or folder in Google Drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
}

impl FileMetadata {
    pub fn is_folder(&self) -> bool {
        self.mime_type.as_deref() == Some(FOLDER_MIME_TYPE)
    }

    /// Shareable link for the object. Falls back to the canonical viewer URL
    /// when the API response did not carry `webViewLink`.
    pub fn link(&self) -> String {
        self.web_view_link
            .clone()
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", self.id))
    }
}

/// Response from the files.list API endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileMetadata>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Google API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u16,
    pub message: String,
}

/// A block of cells as exchanged with the Sheets values API.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Outcome label for a single file sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Added,
    Replaced,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Added => "Added",
            Action::Replaced => "Replaced",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of pushing one local file to its category folder.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Name of the local file, which is also the remote file's name.
    pub filename: String,
    pub file_id: String,
    pub link: String,
    pub action: Action,
    pub category: String,
    /// Whether the category folder had to be created for this upload.
    pub folder_created: bool,
}

/// One upload, as recorded in the tracking sheet.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub filename: String,
    pub link: String,
    pub action: Action,
    pub category: String,
}

impl LogEntry {
    pub fn from_outcome(outcome: &UploadOutcome) -> Self {
        Self {
            filename: outcome.filename.clone(),
            link: outcome.link.clone(),
            action: outcome.action,
            category: outcome.category.clone(),
        }
    }

    /// The five cells of the row, stamped with `timestamp`.
    pub fn to_row(&self, timestamp: &str) -> Vec<String> {
        vec![
            self.filename.clone(),
            self.link.clone(),
            timestamp.to_string(),
            self.action.to_string(),
            self.category.clone(),
        ]
    }
}
