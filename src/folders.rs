//! Category folder lookup-or-create.

use tracing::{debug, info};

use crate::error::Result;
use crate::store::{FileQuery, FileStore};

/// A category folder id and whether this call created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFolder {
    pub id: String,
    pub created: bool,
}

/// Return the id of the folder named `name` directly under `parent_id`,
/// creating it if no such folder exists. When several match, the first one
/// in the store's order wins.
pub async fn resolve_folder<S>(store: &S, parent_id: &str, name: &str) -> Result<ResolvedFolder>
where
    S: FileStore + ?Sized,
{
    let existing = store.list(&FileQuery::folder(name, parent_id)).await?;
    if let Some(folder) = existing.into_iter().next() {
        debug!("Found Drive subfolder {} ({})", name, folder.id);
        return Ok(ResolvedFolder {
            id: folder.id,
            created: false,
        });
    }

    let folder = store.create_folder(name, parent_id).await?;
    info!("Created Drive subfolder: {}", name);
    Ok(ResolvedFolder {
        id: folder.id,
        created: true,
    })
}
