//! Walks the upload root and syncs every file, one at a time.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, SyncError};
use crate::ledger::{LogRecorder, RowChange};
use crate::models::{Action, LogEntry};
use crate::store::{FileStore, TabularLog};
use crate::uploader::sync_file;

/// Counts of what a batch run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub files_added: usize,
    pub files_replaced: usize,
    pub folders_created: usize,
    pub rows_appended: usize,
    pub rows_updated: usize,
}

impl SyncReport {
    pub fn files_synced(&self) -> usize {
        self.files_added + self.files_replaced
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files +{} ~{} | Folders +{} | Rows +{} ~{}",
            self.files_added,
            self.files_replaced,
            self.folders_created,
            self.rows_appended,
            self.rows_updated
        )
    }
}

/// A local file together with the category it is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub category: String,
}

/// Files to sync under `root`, in traversal order.
///
/// Files directly in `root` are skipped. Every other file belongs to the
/// category named after its immediate parent directory, so nested
/// directories become categories of their own. Entries are visited sorted by
/// name.
pub fn collect_files(root: &Path) -> Result<Vec<PendingFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }

        let category = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .ok_or_else(|| SyncError::InvalidFileName(entry.path().display().to_string()))?
            .to_string();

        files.push(PendingFile {
            path: entry.into_path(),
            category,
        });
    }

    Ok(files)
}

/// Sync every file under `upload_root` into `root_folder_id` and record each
/// upload in the tracking log. The first error aborts the rest of the batch.
pub async fn run_batch<S, L>(
    store: &S,
    log: &L,
    root_folder_id: &str,
    upload_root: &Path,
) -> Result<SyncReport>
where
    S: FileStore + ?Sized,
    L: TabularLog + ?Sized,
{
    let mut report = SyncReport::default();

    if !upload_root.is_dir() {
        warn!("Upload root {} does not exist, nothing to sync", upload_root.display());
        return Ok(report);
    }

    let files = collect_files(upload_root)?;
    info!("Found {} file(s) under {}", files.len(), upload_root.display());

    let recorder = LogRecorder::new(log);
    for (idx, file) in files.iter().enumerate() {
        debug!("[{}/{}] {}", idx + 1, files.len(), file.path.display());

        let outcome = sync_file(store, root_folder_id, &file.path, &file.category).await?;
        match outcome.action {
            Action::Added => report.files_added += 1,
            Action::Replaced => report.files_replaced += 1,
        }
        if outcome.folder_created {
            report.folders_created += 1;
        }

        match recorder.record(&LogEntry::from_outcome(&outcome)).await? {
            RowChange::Appended => report.rows_appended += 1,
            RowChange::Updated(_) => report.rows_updated += 1,
        }
    }

    Ok(report)
}
