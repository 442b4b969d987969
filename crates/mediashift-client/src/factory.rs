use crate::{HttpUploadClient, LocalUploadClient, UploadClient, UploadError, UploadResult};
use mediashift_core::{ClientBackend, Config};
use std::sync::Arc;

/// Create an upload client based on configuration
pub async fn create_upload_client(config: &Config) -> UploadResult<Arc<dyn UploadClient>> {
    match config.backend {
        ClientBackend::Http => {
            let client = HttpUploadClient::from_config(config)?;
            Ok(Arc::new(client))
        }

        ClientBackend::Local => {
            let base_path = config.local_dir.clone().ok_or_else(|| {
                UploadError::ConfigError("MEDIASHIFT_LOCAL_DIR not configured".to_string())
            })?;
            let base_url = config.local_base_url.clone().ok_or_else(|| {
                UploadError::ConfigError("MEDIASHIFT_LOCAL_BASE_URL not configured".to_string())
            })?;

            let client = LocalUploadClient::new(base_path, base_url).await?;
            Ok(Arc::new(client))
        }
    }
}
