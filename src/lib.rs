//! drive_ledger - Sync a local category tree to Google Drive and keep an
//! upload log in Google Sheets.
//!
//! Every immediate subdirectory of the upload root is a category. Its files go
//! into a same-named subfolder of the target Drive folder (replacing a
//! same-named file in place), and each upload is recorded as a row
//! (filename, link, timestamp, action, category) in the tracking sheet.
//!
//! # Example
//!
//! ```no_run
//! use drive_ledger::auth::read_client_secret;
//! use drive_ledger::{run_batch, Authenticator, DriveClient, SheetsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let secret = read_client_secret("client_secret.json").await?;
//!     let auth = Authenticator::acquire(secret, "token.json").await?;
//!
//!     let drive = DriveClient::new(auth.clone());
//!     let sheets = SheetsClient::new(auth, "spreadsheet-id");
//!
//!     let report = run_batch(&drive, &sheets, "folder-id", "uploads".as_ref()).await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod batch;
pub mod config;
pub mod drive;
pub mod error;
pub mod folders;
pub mod ledger;
pub mod models;
pub mod sheets;
pub mod store;
pub mod uploader;
pub mod url_parser;

// Re-exports for convenience
pub use auth::Authenticator;
pub use batch::{run_batch, SyncReport};
pub use config::SyncConfig;
pub use drive::DriveClient;
pub use error::{Result, SyncError};
pub use models::{Action, FileMetadata};
pub use sheets::SheetsClient;
pub use store::{FileStore, TabularLog};
