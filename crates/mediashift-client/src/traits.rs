//! Upload abstraction trait
//!
//! This module defines the UploadClient trait that all upload backends must
//! implement. The engine depends only on this contract.

use async_trait::async_trait;
use mediashift_core::ClientBackend;
use std::collections::HashMap;
use thiserror::Error;

/// Upload operation errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("Failed to send request: {0}")]
    RequestFailed(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Per-upload options forwarded by the engine.
///
/// `folder` is the logical destination grouping. `extra` carries the item's
/// provider-specific hints verbatim; backends that do not understand a hint
/// ignore it.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub folder: String,
    pub extra: HashMap<String, serde_json::Value>,
}

impl UploadOptions {
    pub fn for_folder(folder: impl Into<String>) -> Self {
        UploadOptions {
            folder: folder.into(),
            extra: HashMap::new(),
        }
    }
}

/// A successfully hosted resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub hosted_url: String,
}

/// Upload abstraction trait
///
/// All upload backends (HTTP API, local directory) must implement this
/// trait. Retry policy, if any, lives behind this boundary; the engine never
/// retries.
#[async_trait]
pub trait UploadClient: Send + Sync {
    /// Upload the resource named by `locator` and return its hosted URL.
    async fn upload(&self, locator: &str, options: &UploadOptions)
        -> UploadResult<UploadedMedia>;

    /// Get the upload backend type
    fn backend_type(&self) -> ClientBackend;
}

/// Split a locator into its last path segment, for use as the uploaded
/// filename. Falls back to "file" when the locator has no usable segment.
pub(crate) fn locator_filename(locator: &str) -> String {
    let trimmed = locator.trim_end_matches('/');
    let candidate = trimmed.rsplit(['/', '\\']).next().unwrap_or("");
    // Strip any query string a URL locator may carry.
    let candidate = candidate.split(['?', '#']).next().unwrap_or("");
    if candidate.is_empty() {
        "file".to_string()
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_filename_from_path() {
        assert_eq!(locator_filename("./public/images/logo.png"), "logo.png");
        assert_eq!(locator_filename("/var/lib/a/b.webp"), "b.webp");
    }

    #[test]
    fn locator_filename_from_url() {
        assert_eq!(
            locator_filename("https://images.example.com/photo-123.jpg?w=800&q=80"),
            "photo-123.jpg"
        );
        assert_eq!(locator_filename("https://example.com/"), "file");
    }

    #[test]
    fn locator_filename_empty_falls_back() {
        assert_eq!(locator_filename(""), "file");
    }
}
