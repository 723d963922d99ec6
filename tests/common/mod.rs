//! In-memory stand-ins for Drive and Sheets, plus helpers shared by the
//! integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use drive_ledger::auth::Authenticator;
use drive_ledger::models::{FileMetadata, FOLDER_MIME_TYPE};
use drive_ledger::store::{FileQuery, FileStore, TabularLog, Upload};
use drive_ledger::{Result, SyncError};

pub const ROOT_FOLDER: &str = "root-folder";

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub meta: FileMetadata,
    pub parent_id: String,
    pub content: Vec<u8>,
}

/// A flat Drive: every object knows its single parent.
#[derive(Default)]
pub struct InMemoryStore {
    objects: Mutex<Vec<StoredObject>>,
    next_id: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{}-{}", prefix, next)
    }

    /// Seed an object directly, bypassing the trait.
    pub fn insert(&self, name: &str, parent_id: &str, mime_type: Option<&str>) -> String {
        let id = self.allocate_id("seed");
        self.objects.lock().unwrap().push(StoredObject {
            meta: FileMetadata {
                id: id.clone(),
                name: name.to_string(),
                mime_type: mime_type.map(str::to_string),
                web_view_link: Some(format!("https://drive.test/{}", id)),
            },
            parent_id: parent_id.to_string(),
            content: Vec::new(),
        });
        id
    }

    pub fn children(&self, parent_id: &str) -> Vec<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.parent_id == parent_id)
            .cloned()
            .collect()
    }

    pub fn folders_named(&self, name: &str) -> Vec<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.meta.name == name && o.meta.is_folder())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.meta.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

/// Drive's `q` semantics for the lookups the sync logic issues.
fn matches(query: &FileQuery, file: &FileMetadata, parent_id: &str) -> bool {
    file.name == query.name
        && parent_id == query.parent_id
        && (!query.folders_only || file.is_folder())
}

#[async_trait]
impl FileStore for InMemoryStore {
    async fn list(&self, query: &FileQuery) -> Result<Vec<FileMetadata>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| matches(query, &o.meta, &o.parent_id))
            .map(|o| o.meta.clone())
            .collect())
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileMetadata> {
        let id = self.allocate_id("folder");
        let meta = FileMetadata {
            id: id.clone(),
            name: name.to_string(),
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            web_view_link: Some(format!("https://drive.test/folders/{}", id)),
        };
        self.objects.lock().unwrap().push(StoredObject {
            meta: meta.clone(),
            parent_id: parent_id.to_string(),
            content: Vec::new(),
        });
        Ok(meta)
    }

    async fn create_file(&self, upload: Upload, parent_id: &str) -> Result<FileMetadata> {
        let id = self.allocate_id("file");
        let meta = FileMetadata {
            id: id.clone(),
            name: upload.name,
            mime_type: Some(upload.mime_type),
            web_view_link: Some(format!("https://drive.test/file/{}", id)),
        };
        self.objects.lock().unwrap().push(StoredObject {
            meta: meta.clone(),
            parent_id: parent_id.to_string(),
            content: upload.content,
        });
        Ok(meta)
    }

    async fn update_file(&self, file_id: &str, upload: Upload) -> Result<FileMetadata> {
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .iter_mut()
            .find(|o| o.meta.id == file_id)
            .ok_or_else(|| SyncError::Api {
                status: 404,
                message: format!("File not found: {}", file_id),
            })?;
        object.content = upload.content;
        Ok(object.meta.clone())
    }
}

/// A single-sheet grid addressed by `A:E`, `A<n>:E<n>` style ranges.
#[derive(Default)]
pub struct InMemorySheet {
    rows: Mutex<Vec<Vec<String>>>,
    calls: Mutex<Vec<String>>,
}

impl InMemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Vec<&str>>) -> Self {
        let sheet = Self::default();
        *sheet.rows.lock().unwrap() = rows
            .into_iter()
            .map(|r| r.into_iter().map(str::to_string).collect())
            .collect();
        sheet
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    /// Calls made so far, as `"get A:E"`, `"update A1:E1"`, `"append A:E"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn start_row(range: &str) -> usize {
        let start = range.split(':').next().unwrap_or(range);
        start
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .unwrap_or(1)
    }
}

#[async_trait]
impl TabularLog for InMemorySheet {
    async fn get(&self, range: &str) -> Result<Vec<Vec<String>>> {
        self.calls.lock().unwrap().push(format!("get {}", range));
        Ok(self.rows())
    }

    async fn update(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        self.calls.lock().unwrap().push(format!("update {}", range));
        let mut grid = self.rows.lock().unwrap();
        let start = Self::start_row(range) - 1;
        for (offset, row) in rows.into_iter().enumerate() {
            let index = start + offset;
            if grid.len() <= index {
                grid.resize(index + 1, Vec::new());
            }
            grid[index] = row;
        }
        Ok(())
    }

    async fn append(&self, range: &str, rows: Vec<Vec<String>>) -> Result<()> {
        self.calls.lock().unwrap().push(format!("append {}", range));
        self.rows.lock().unwrap().extend(rows);
        Ok(())
    }
}

/// An authenticator that always hands out `test-token`.
pub fn test_auth() -> Authenticator {
    Authenticator::with_static_token("test-token")
}
