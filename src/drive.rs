//! Google Drive v3 client backing the [`FileStore`] capability.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::auth::Authenticator;
use crate::error::{ensure_success, Result, SyncError};
use crate::models::{FileListResponse, FileMetadata, FOLDER_MIME_TYPE};
use crate::store::{FileQuery, FileStore, Upload};

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Upload URL for Google Drive API.
const UPLOAD_API_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Fields requested for every object the client returns.
const FILE_FIELDS: &str = "id, name, mimeType, webViewLink";

/// Client for the folder and file operations of one Drive account.
pub struct DriveClient {
    auth: Authenticator,
    http: Client,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    pub fn new(auth: Authenticator) -> Self {
        Self::with_base_urls(auth, DRIVE_API_BASE, UPLOAD_API_BASE)
    }

    /// Point the client at other endpoints (a local mock server in tests).
    pub fn with_base_urls(
        auth: Authenticator,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            http: Client::new(),
            api_base: api_base.into(),
            upload_base: upload_base.into(),
        }
    }

    /// Run a resumable upload session: `init` opens the session, then the
    /// whole body goes up in a single PUT.
    async fn upload_session(&self, init: RequestBuilder, upload: Upload) -> Result<FileMetadata> {
        let init_response = init
            .query(&[("uploadType", "resumable")])
            .header("X-Upload-Content-Type", &upload.mime_type)
            .header("X-Upload-Content-Length", upload.content.len().to_string())
            .send()
            .await?;
        let init_response = ensure_success(init_response).await?;

        let session_url = init_response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SyncError::Api {
                status: init_response.status().as_u16(),
                message: "No upload URL in response".to_string(),
            })?
            .to_string();
        debug!("Uploading {} bytes of {}", upload.content.len(), upload.name);

        let response = self
            .http
            .put(&session_url)
            .header("Content-Type", &upload.mime_type)
            .query(&[("fields", FILE_FIELDS)])
            .body(upload.content)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FileStore for DriveClient {
    async fn list(&self, query: &FileQuery) -> Result<Vec<FileMetadata>> {
        let q = query.to_drive_query();
        debug!("Drive query: {}", q);

        let token = self.auth.access_token().await?;
        let mut all_files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/files", self.api_base))
                .bearer_auth(&token)
                .query(&[
                    ("q", q.as_str()),
                    ("spaces", "drive"),
                    ("fields", "nextPageToken, files(id, name, mimeType, webViewLink)"),
                ]);

            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = ensure_success(request.send().await?).await?;
            let list_response: FileListResponse = response.json().await?;
            all_files.extend(list_response.files);

            match list_response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(all_files)
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<FileMetadata> {
        let token = self.auth.access_token().await?;
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id]
        });

        let response = self
            .http
            .post(format!("{}/files", self.api_base))
            .bearer_auth(&token)
            .query(&[("fields", FILE_FIELDS)])
            .json(&metadata)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(response.json().await?)
    }

    async fn create_file(&self, upload: Upload, parent_id: &str) -> Result<FileMetadata> {
        let token = self.auth.access_token().await?;
        let metadata = serde_json::json!({
            "name": upload.name,
            "parents": [parent_id]
        });

        let init = self
            .http
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(&token)
            .json(&metadata);
        self.upload_session(init, upload).await
    }

    async fn update_file(&self, file_id: &str, upload: Upload) -> Result<FileMetadata> {
        let token = self.auth.access_token().await?;

        let init = self
            .http
            .patch(format!("{}/files/{}", self.upload_base, file_id))
            .bearer_auth(&token)
            .json(&serde_json::json!({}));
        self.upload_session(init, upload).await
    }
}
