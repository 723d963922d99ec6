//! Pushes one local file into its category folder, replacing a same-named
//! remote file in place or creating a new one.

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::folders::resolve_folder;
use crate::models::{Action, UploadOutcome};
use crate::store::{FileQuery, FileStore, Upload};

/// Upload `local_path` into the `category` subfolder of `root_folder_id`.
///
/// An existing non-trashed file with exactly the same name is overwritten
/// unconditionally, even when its content is identical. Otherwise a new file
/// is created.
pub async fn sync_file<S>(
    store: &S,
    root_folder_id: &str,
    local_path: &Path,
    category: &str,
) -> Result<UploadOutcome>
where
    S: FileStore + ?Sized,
{
    let folder = resolve_folder(store, root_folder_id, category).await?;
    let upload = Upload::from_path(local_path).await?;

    let existing = store
        .list(&FileQuery::file(&upload.name, &folder.id))
        .await?
        .into_iter()
        .next();

    let filename = upload.name.clone();
    let (file, action) = match existing {
        Some(existing) => {
            let file = store.update_file(&existing.id, upload).await?;
            info!("Replaced file in {}: {}", category, filename);
            (file, Action::Replaced)
        }
        None => {
            let file = store.create_file(upload, &folder.id).await?;
            info!("Uploaded new file in {}: {}", category, filename);
            (file, Action::Added)
        }
    };

    Ok(UploadOutcome {
        filename,
        link: file.link(),
        file_id: file.id,
        action,
        category: category.to_string(),
        folder_created: folder.created,
    })
}
