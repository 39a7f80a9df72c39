//! Export trigger: navigate to the collector's export download.

use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_DISPOSITION;
use tracing::info;

pub const EXPORT_PATH: &str = "/export";
const FALLBACK_FILENAME: &str = "scans.xlsx";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("export returned HTTP {0}")]
    Status(u16),
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Follows a plain GET navigation to `path`; the navigator owns whatever the
/// response turns into.
#[async_trait::async_trait]
pub trait Navigator: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the navigation fails.
    async fn navigate(&self, path: &str) -> Result<(), ExportError>;
}

/// Navigate to the export path. No request body, no return value.
///
/// # Errors
///
/// Returns whatever the navigator reports.
pub async fn trigger_export(navigator: &dyn Navigator) -> Result<(), ExportError> {
    navigator.navigate(EXPORT_PATH).await
}

// =============================================================================
// DOWNLOAD NAVIGATOR
// =============================================================================

/// Where a download lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Save under this directory using the server-suggested filename.
    Dir(PathBuf),
    /// Save to exactly this path.
    File(PathBuf),
}

/// Navigator that behaves like a browser download: the response body is
/// saved to disk.
pub struct DownloadNavigator {
    http: reqwest::Client,
    base_url: String,
    target: DownloadTarget,
}

impl DownloadNavigator {
    #[must_use]
    pub fn new(base_url: &str, target: DownloadTarget) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned(), target }
    }

    fn destination(&self, suggested: Option<String>) -> PathBuf {
        match &self.target {
            DownloadTarget::File(path) => path.clone(),
            DownloadTarget::Dir(dir) => dir.join(suggested.as_deref().unwrap_or(FALLBACK_FILENAME)),
        }
    }
}

#[async_trait::async_trait]
impl Navigator for DownloadNavigator {
    async fn navigate(&self, path: &str) -> Result<(), ExportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }

        let suggested = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename);
        let bytes = response.bytes().await?;

        let destination = self.destination(suggested);
        tokio::fs::write(&destination, &bytes).await?;

        info!(url = %url, path = %destination.display(), bytes = bytes.len(), "export downloaded");
        Ok(())
    }
}

/// Extract a bare filename from a `Content-Disposition` header value.
/// Directory components are dropped so the server cannot pick the location.
pub(crate) fn attachment_filename(header: &str) -> Option<String> {
    let raw = header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');

    let name = Path::new(raw).file_name()?.to_str()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_owned())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
