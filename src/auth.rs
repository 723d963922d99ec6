//! OAuth credentials for the Drive and Sheets APIs.
//!
//! The installed-app flow, the on-disk token store and refresh all come from
//! `yup-oauth2`. A credential is acquired once at startup: a cached token is
//! reused, an expired one is refreshed, and a missing one opens the consent
//! page in the browser and waits for the loopback redirect. Tokens refreshed
//! later in the run are written back to the same file.

use std::future::Future;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info};
use yup_oauth2::authenticator_delegate::InstalledFlowDelegate;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

use crate::error::{Result, SyncError};

/// Scopes requested at consent time.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/spreadsheets",
];

/// Opens the consent URL for the user.
pub type BrowserOpener = fn(&str) -> io::Result<()>;

type TokenFuture = Pin<Box<dyn Future<Output = Result<String>> + Send>>;

/// Load an OAuth client file (`installed` or `web` application type).
pub async fn read_client_secret(path: impl AsRef<Path>) -> Result<ApplicationSecret> {
    let path = path.as_ref();
    yup_oauth2::read_application_secret(path)
        .await
        .map_err(|e| SyncError::InvalidClientSecrets(format!("{}: {}", path.display(), e)))
}

/// Presents the consent URL by launching a browser. Failing to launch one is
/// an authorization error, not a prompt to wait.
struct BrowserDelegate {
    opener: BrowserOpener,
}

impl InstalledFlowDelegate for BrowserDelegate {
    fn present_user_url<'a>(
        &'a self,
        url: &'a str,
        _need_code: bool,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<String, String>> + Send + 'a>> {
        Box::pin(async move {
            info!("Opening browser for Google authorization");
            debug!("Authorization URL: {}", url);
            (self.opener)(url).map_err(|e| format!("could not open a browser: {}", e))?;
            // HTTPRedirect reads the code from the loopback request.
            Ok(String::new())
        })
    }
}

/// Hands out access tokens to the API clients.
#[derive(Clone)]
pub struct Authenticator {
    fetch: Arc<dyn Fn() -> TokenFuture + Send + Sync>,
}

impl Authenticator {
    /// Obtain a usable credential, persisted at `token_path`.
    pub async fn acquire(secret: ApplicationSecret, token_path: impl AsRef<Path>) -> Result<Self> {
        Self::acquire_with_opener(secret, token_path, |url| open::that(url)).await
    }

    /// Same as [`Authenticator::acquire`], presenting the consent URL through
    /// `opener` instead of the system browser.
    pub async fn acquire_with_opener(
        secret: ApplicationSecret,
        token_path: impl AsRef<Path>,
        opener: BrowserOpener,
    ) -> Result<Self> {
        let token_path = token_path.as_ref();
        if let Some(parent) = token_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let auth = InstalledFlowAuthenticator::builder(
            secret,
            InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(token_path.to_path_buf())
        .flow_delegate(Box::new(BrowserDelegate { opener }))
        .build()
        .await
        .map_err(|e| SyncError::Authorization(format!("{}: {}", token_path.display(), e)))?;
        let auth = Arc::new(auth);

        let fetch = move || -> TokenFuture {
            let auth = Arc::clone(&auth);
            Box::pin(async move {
                let token = auth
                    .token(&SCOPES)
                    .await
                    .map_err(|e| SyncError::Authorization(e.to_string()))?;
                token.token().map(str::to_string).ok_or_else(|| {
                    SyncError::Authorization("token response carried no access token".to_string())
                })
            })
        };
        let authenticator = Self {
            fetch: Arc::new(fetch),
        };

        // Run the flow now so a credential problem stops the batch before any upload.
        authenticator.access_token().await?;
        debug!("Credential ready, cached at {}", token_path.display());
        Ok(authenticator)
    }

    /// Use a bearer token obtained elsewhere. It is never refreshed.
    pub fn with_static_token(token: impl Into<String>) -> Self {
        let token: Arc<str> = Arc::from(token.into());
        let fetch = move || -> TokenFuture {
            let token = token.to_string();
            Box::pin(async move { Ok(token) })
        };
        Self {
            fetch: Arc::new(fetch),
        }
    }

    /// A currently valid access token, refreshed first if it has expired.
    pub async fn access_token(&self) -> Result<String> {
        (self.fetch)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refuse(_url: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no runnable browser"))
    }

    #[tokio::test]
    async fn test_delegate_reports_missing_browser() {
        let delegate = BrowserDelegate { opener: refuse };
        let err = delegate
            .present_user_url("https://accounts.example.com/auth", false)
            .await
            .unwrap_err();
        assert!(err.starts_with("could not open a browser"));
        assert!(err.contains("no runnable browser"));
    }

    #[tokio::test]
    async fn test_delegate_needs_no_pasted_code() {
        let delegate = BrowserDelegate { opener: |_| Ok(()) };
        let code = delegate
            .present_user_url("https://accounts.example.com/auth", false)
            .await
            .unwrap();
        assert!(code.is_empty());
    }

    #[tokio::test]
    async fn test_static_token() {
        let auth = Authenticator::with_static_token("abc");
        assert_eq!(auth.access_token().await.unwrap(), "abc");
        assert_eq!(auth.clone().access_token().await.unwrap(), "abc");
    }
}
