//! Accepts the target folder and spreadsheet either as raw ids or as the URLs
//! a user copies out of the browser.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SyncError};

static FOLDER_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://drive\.google\.com/drive/(?:u/\d+/)?folders/([a-zA-Z0-9_-]+)")
        .expect("Invalid folder URL regex")
});

static OPEN_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)")
        .expect("Invalid open URL regex")
});

static SPREADSHEET_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://docs\.google\.com/spreadsheets/(?:u/\d+/)?d/([a-zA-Z0-9_-]+)")
        .expect("Invalid spreadsheet URL regex")
});

/// Valid Google id pattern (alphanumeric, underscore, hyphen).
static ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("Invalid ID regex"));

/// Extract a Drive folder id.
///
/// Accepts:
/// - `https://drive.google.com/drive/folders/<ID>`
/// - `https://drive.google.com/drive/u/0/folders/<ID>`
/// - `https://drive.google.com/open?id=<ID>`
/// - a raw id
///
/// ```
/// use drive_ledger::url_parser::extract_folder_id;
///
/// let id = extract_folder_id("https://drive.google.com/drive/folders/1abc123").unwrap();
/// assert_eq!(id, "1abc123");
/// ```
pub fn extract_folder_id(url_or_id: &str) -> Result<String> {
    extract_with(url_or_id, &[&FOLDER_URL_REGEX, &OPEN_URL_REGEX])
}

/// Extract a spreadsheet id from `https://docs.google.com/spreadsheets/d/<ID>/...`
/// or a raw id.
///
/// ```
/// use drive_ledger::url_parser::extract_spreadsheet_id;
///
/// let id = extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/1xyz/edit#gid=0").unwrap();
/// assert_eq!(id, "1xyz");
/// ```
pub fn extract_spreadsheet_id(url_or_id: &str) -> Result<String> {
    extract_with(url_or_id, &[&SPREADSHEET_URL_REGEX])
}

fn extract_with(url_or_id: &str, patterns: &[&Regex]) -> Result<String> {
    let trimmed = url_or_id.trim();

    let from_url = patterns
        .iter()
        .find_map(|re| re.captures(trimmed))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string());
    if let Some(id) = from_url {
        return Ok(id);
    }

    if ID_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(SyncError::InvalidUrlOrId(url_or_id.to_string()))
}
