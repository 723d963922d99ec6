//! drive_ledger CLI - upload the category tree and log it to the sheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use drive_ledger::auth::read_client_secret;
use drive_ledger::config::{DEFAULT_CLIENT_SECRET, DEFAULT_TOKEN_CACHE, DEFAULT_UPLOAD_ROOT};
use drive_ledger::{run_batch, Authenticator, DriveClient, SheetsClient, SyncConfig};

/// Sync a local category tree to Google Drive and log each upload in Google Sheets.
#[derive(Parser)]
#[command(name = "drive_ledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target Drive folder URL or ID.
    #[arg(long, env = "DRIVE_FOLDER_ID")]
    drive_folder: String,

    /// Tracking spreadsheet URL or ID.
    #[arg(long, env = "SHEET_ID")]
    sheet: String,

    /// Local directory whose subdirectories are the categories.
    #[arg(long, default_value = DEFAULT_UPLOAD_ROOT)]
    upload_root: PathBuf,

    /// Where the OAuth token is cached between runs.
    #[arg(long, env = "TOKEN_CACHE", default_value = DEFAULT_TOKEN_CACHE)]
    token_cache: PathBuf,

    /// OAuth client secret file downloaded from the Cloud console.
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", default_value = DEFAULT_CLIENT_SECRET)]
    client_secret: PathBuf,

    /// Use this bearer token instead of the OAuth flow (not refreshed).
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Log level (error, warn, info, debug).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = SyncConfig::new(&cli.drive_folder, &cli.sheet)
        .context("Invalid drive folder or sheet")?
        .with_upload_root(cli.upload_root)
        .with_token_path(cli.token_cache)
        .with_client_secret_path(cli.client_secret);

    let auth = match cli.access_token {
        Some(token) => Authenticator::with_static_token(token),
        None => {
            let secret = read_client_secret(&config.client_secret_path)
                .await
                .with_context(|| {
                    format!("Failed to load client secret {:?}", config.client_secret_path)
                })?;
            Authenticator::acquire(secret, &config.token_path)
                .await
                .context("Failed to obtain Google credentials")?
        }
    };

    let drive = DriveClient::new(auth.clone());
    let sheets = SheetsClient::new(auth, &config.spreadsheet_id);

    info!("Syncing {} to folder {}", config.upload_root.display(), config.drive_folder_id);
    let report = run_batch(&drive, &sheets, &config.drive_folder_id, &config.upload_root)
        .await
        .context("Sync aborted")?;

    println!("Done. {}", report);
    Ok(())
}

fn init_logging(level: &str) {
    let filter = match level {
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt().with_max_level(filter).init();
}
