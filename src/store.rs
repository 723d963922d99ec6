//! Capability traits the sync logic is written against.
//!
//! `FileStore` is a folder/file store with list, create and update.
//! `TabularLog` is a sheet-like log with get, update and append over A1 ranges.
//! The live implementations are [`crate::drive::DriveClient`] and
//! [`crate::sheets::SheetsClient`].

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Result, SyncError};
use crate::models::{FileMetadata, FOLDER_MIME_TYPE};

/// Exact-name lookup inside one parent folder. Trashed objects never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    pub name: String,
    pub parent_id: String,
    pub folders_only: bool,
}

impl FileQuery {
    pub fn folder(name: &str, parent_id: &str) -> Self {
        Self {
            name: name.to_string(),
            parent_id: parent_id.to_string(),
            folders_only: true,
        }
    }

    pub fn file(name: &str, parent_id: &str) -> Self {
        Self {
            name: name.to_string(),
            parent_id: parent_id.to_string(),
            folders_only: false,
        }
    }

    /// Render as a Drive `q` expression.
    pub fn to_drive_query(&self) -> String {
        let mut query = format!(
            "name = '{}' and '{}' in parents and trashed = false",
            escape_query_value(&self.name),
            escape_query_value(&self.parent_id)
        );
        if self.folders_only {
            query.push_str(&format!(" and mimeType = '{}'", FOLDER_MIME_TYPE));
        }
        query
    }
}

/// Escape a value for use inside a single-quoted Drive query string.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// File content ready to be sent, named after the local file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub async fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::InvalidFileName(path.display().to_string()))?
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        let content = tokio::fs::read(path).await?;

        Ok(Self {
            name,
            mime_type,
            content,
        })
    }
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// All non-trashed objects matching `query`, in the store's own order.
    async fn list(&self, query: &FileQuery) -> Result<Vec<FileMetadata>>;

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileMetadata>;

    async fn create_file(&self, upload: Upload, parent_id: &str) -> Result<FileMetadata>;

    /// Replace the content of an existing file, keeping its id and name.
    async fn update_file(&self, file_id: &str, upload: Upload) -> Result<FileMetadata>;
}

#[async_trait]
pub trait TabularLog: Send + Sync {
    /// Rows in `range`; an empty sheet yields no rows.
    async fn get(&self, range: &str) -> Result<Vec<Vec<String>>>;

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;

    /// Add rows after the last non-empty row of the table in `range`.
    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()>;
}
