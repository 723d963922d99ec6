//! Run configuration, passed explicitly to the components that need it.

use std::path::PathBuf;

use crate::error::Result;
use crate::url_parser::{extract_folder_id, extract_spreadsheet_id};

pub const DEFAULT_UPLOAD_ROOT: &str = "uploads";
pub const DEFAULT_TOKEN_CACHE: &str = "token.json";
pub const DEFAULT_CLIENT_SECRET: &str = "client_secret.json";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Drive folder the category subfolders live under.
    pub drive_folder_id: String,
    /// Spreadsheet holding the tracking log.
    pub spreadsheet_id: String,
    /// Local directory whose subdirectories are the categories.
    pub upload_root: PathBuf,
    pub token_path: PathBuf,
    pub client_secret_path: PathBuf,
}

impl SyncConfig {
    /// Build a config from user input. Both targets may be given as raw ids or
    /// as the browser URL of the folder / spreadsheet.
    pub fn new(drive_folder: &str, spreadsheet: &str) -> Result<Self> {
        Ok(Self {
            drive_folder_id: extract_folder_id(drive_folder)?,
            spreadsheet_id: extract_spreadsheet_id(spreadsheet)?,
            upload_root: PathBuf::from(DEFAULT_UPLOAD_ROOT),
            token_path: PathBuf::from(DEFAULT_TOKEN_CACHE),
            client_secret_path: PathBuf::from(DEFAULT_CLIENT_SECRET),
        })
    }

    pub fn with_upload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.upload_root = root.into();
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn with_client_secret_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_secret_path = path.into();
        self
    }
}
