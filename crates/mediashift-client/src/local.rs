use crate::traits::{
    locator_filename, UploadClient, UploadError, UploadOptions, UploadResult, UploadedMedia,
};
use async_trait::async_trait;
use mediashift_core::ClientBackend;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local directory upload client.
///
/// Copies each resource into `{base_path}/{folder}/{filename}` and mints the
/// hosted URL as `{base_url}/{folder}/{filename}`. Used for dry runs and
/// tests; only filesystem locators are supported.
#[derive(Clone)]
pub struct LocalUploadClient {
    base_path: PathBuf,
    base_url: String,
}

impl LocalUploadClient {
    /// Create a new LocalUploadClient instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for uploaded files
    /// * `base_url` - Base URL minted into hosted URLs (e.g., "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> UploadResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            UploadError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadClient {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the destination path for a folder/filename pair, rejecting
    /// anything that could escape the base directory.
    fn destination(&self, folder: &str, filename: &str) -> UploadResult<PathBuf> {
        for segment in [folder, filename] {
            if segment.contains("..") || segment.starts_with('/') {
                return Err(UploadError::InvalidLocator(format!(
                    "Destination segment contains invalid characters: {}",
                    segment
                )));
            }
        }

        if folder.is_empty() {
            return Ok(self.base_path.join(filename));
        }
        Ok(self.base_path.join(folder).join(filename))
    }

    fn generate_url(&self, folder: &str, filename: &str) -> String {
        if folder.is_empty() {
            format!("{}/{}", self.base_url, filename)
        } else {
            format!("{}/{}/{}", self.base_url, folder, filename)
        }
    }

    async fn ensure_parent_dir(path: &Path) -> UploadResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UploadClient for LocalUploadClient {
    async fn upload(
        &self,
        locator: &str,
        options: &UploadOptions,
    ) -> UploadResult<UploadedMedia> {
        if locator.contains("://") {
            return Err(UploadError::InvalidLocator(format!(
                "Local backend supports filesystem locators only: {}",
                locator
            )));
        }

        let start = std::time::Instant::now();

        let data = fs::read(locator)
            .await
            .map_err(|e| UploadError::ReadFailed {
                path: locator.to_string(),
                message: e.to_string(),
            })?;
        let size = data.len();

        let filename = locator_filename(locator);
        let path = self.destination(&options.folder, &filename)?;
        Self::ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;

        let url = self.generate_url(&options.folder, &filename);

        tracing::info!(
            locator = %locator,
            path = %path.display(),
            hosted_url = %url,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local upload successful"
        );

        Ok(UploadedMedia { hosted_url: url })
    }

    fn backend_type(&self) -> ClientBackend {
        ClientBackend::Local
    }
}
