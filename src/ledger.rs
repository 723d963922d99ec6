//! Tracking sheet upkeep: one row per filename, updated in place on repeat
//! uploads and appended otherwise.

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::Result;
use crate::models::LogEntry;
use crate::store::TabularLog;

/// Columns read when scanning for an existing row.
pub const LOG_RANGE: &str = "A:E";

/// Written to row 1 of an empty sheet. Readers of the sheet locate columns by
/// this header and by position, so the order is fixed.
pub const HEADER: [&str; 5] = ["Filename", "Link", "Last Updated", "Action", "Category"];

/// Format of the "Last Updated" column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a call to [`LogRecorder::record`] did to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// Overwrote the existing row at this 1-based index.
    Updated(usize),
    Appended,
}

pub struct LogRecorder<'a, L: TabularLog + ?Sized> {
    log: &'a L,
}

impl<'a, L: TabularLog + ?Sized> LogRecorder<'a, L> {
    pub fn new(log: &'a L) -> Self {
        Self { log }
    }

    /// Record `entry` stamped with the current local time.
    pub async fn record(&self, entry: &LogEntry) -> Result<RowChange> {
        self.record_at(entry, Local::now()).await
    }

    pub async fn record_at(&self, entry: &LogEntry, at: DateTime<Local>) -> Result<RowChange> {
        let mut rows = self.log.get(LOG_RANGE).await?;

        if rows.is_empty() {
            let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
            self.log.update("A1:E1", vec![header.clone()]).await?;
            rows = vec![header];
        }

        let row = entry.to_row(&at.format(TIMESTAMP_FORMAT).to_string());

        match find_row(&rows, &entry.filename) {
            Some(index) => {
                self.log
                    .update(&format!("A{index}:E{index}"), vec![row])
                    .await?;
                info!("Updated Sheets row for: {}", entry.filename);
                Ok(RowChange::Updated(index))
            }
            None => {
                self.log.append(LOG_RANGE, vec![row]).await?;
                info!("Added new Sheets row for: {}", entry.filename);
                Ok(RowChange::Appended)
            }
        }
    }
}

/// 1-based index of the first row whose first cell equals `filename`.
/// The header counts as row 1.
fn find_row(rows: &[Vec<String>], filename: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.first().map(String::as_str) == Some(filename))
        .map(|i| i + 1)
}
