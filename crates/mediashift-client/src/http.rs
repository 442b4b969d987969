use crate::traits::{
    locator_filename, UploadClient, UploadError, UploadOptions, UploadResult, UploadedMedia,
};
use async_trait::async_trait;
use mediashift_core::{AuthScheme, ClientBackend, Config};
use serde::Deserialize;
use std::time::Duration;

/// Upload endpoint on the media-hosting API.
const UPLOAD_PATH: &str = "/api/v0/images";

/// Authentication strategy for the hosting API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// Shape of the hosting API's upload response. Only the hosted URL is
/// consumed; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP upload client for a media-hosting API.
///
/// Resolves locators itself: `http://`/`https://` locators are downloaded
/// first, everything else is read from the local filesystem. The payload is
/// then posted as a multipart form together with the destination folder and
/// any extra options.
#[derive(Clone, Debug)]
pub struct HttpUploadClient {
    client: reqwest::Client,
    base_url: String,
    auth: Auth,
}

impl HttpUploadClient {
    pub fn new(base_url: String, auth: Auth, timeout: Duration) -> UploadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Build a client from the application config. Fails when the http
    /// backend's required settings are missing.
    pub fn from_config(config: &Config) -> UploadResult<Self> {
        let base_url = config
            .api_url
            .clone()
            .ok_or_else(|| UploadError::ConfigError("MEDIASHIFT_API_URL not configured".to_string()))?;
        let key = config
            .api_key
            .clone()
            .ok_or_else(|| UploadError::ConfigError("MEDIASHIFT_API_KEY not configured".to_string()))?;

        let auth = match config.auth_scheme {
            AuthScheme::ApiKey => Auth::XApiKey(key),
            AuthScheme::Bearer => Auth::Bearer(key),
        };

        Self::new(base_url, auth, Duration::from_secs(config.upload_timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// Load the resource bytes for a locator, resolving remote vs. local.
    async fn load_source(&self, locator: &str) -> UploadResult<Vec<u8>> {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            return self.fetch_remote(locator).await;
        }
        if locator.contains("://") {
            return Err(UploadError::InvalidLocator(format!(
                "Unsupported locator scheme: {}",
                locator
            )));
        }

        tokio::fs::read(locator)
            .await
            .map_err(|e| UploadError::ReadFailed {
                path: locator.to_string(),
                message: e.to_string(),
            })
    }

    async fn fetch_remote(&self, url: &str) -> UploadResult<Vec<u8>> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| UploadError::FetchFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::FetchFailed {
                url: url.to_string(),
                message: format!("source returned status {}", status),
            });
        }

        let data = response.bytes().await.map_err(|e| UploadError::FetchFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(data.to_vec())
    }

    fn build_form(data: Vec<u8>, filename: String, options: &UploadOptions) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(data).file_name(filename),
            )
            .text("folder", options.folder.clone());

        for (name, value) in &options.extra {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            form = form.text(name.clone(), text);
        }

        form
    }
}

#[async_trait]
impl UploadClient for HttpUploadClient {
    async fn upload(
        &self,
        locator: &str,
        options: &UploadOptions,
    ) -> UploadResult<UploadedMedia> {
        let start = std::time::Instant::now();

        let data = self.load_source(locator).await?;
        let size = data.len();
        let filename = locator_filename(locator);
        let form = Self::build_form(data, filename, options);

        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            locator = %locator,
            folder = %options.folder,
            hosted_url = %body.url,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "HTTP upload successful"
        );

        Ok(UploadedMedia {
            hosted_url: body.url,
        })
    }

    fn backend_type(&self) -> ClientBackend {
        ClientBackend::Http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpUploadClient {
        HttpUploadClient::new(
            server.uri(),
            Auth::XApiKey("secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    async fn mount_upload_ok(server: &MockServer, hosted_url: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v0/images"))
            .and(header("X-API-Key", "secret"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "url": hosted_url })),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_upload_local_file() {
        let server = MockServer::start().await;
        mount_upload_ok(&server, "https://cdn.example.com/logo.png").await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logo.png");
        std::fs::write(&file, b"png bytes").unwrap();

        let client = client_for(&server);
        let uploaded = client
            .upload(
                file.to_str().unwrap(),
                &UploadOptions::for_folder("services"),
            )
            .await
            .unwrap();

        assert_eq!(uploaded.hosted_url, "https://cdn.example.com/logo.png");
    }

    #[tokio::test]
    async fn test_upload_remote_url() {
        let server = MockServer::start().await;
        mount_upload_ok(&server, "https://cdn.example.com/photo.jpg").await;
        Mock::given(method("GET"))
            .and(path("/source/photo.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg bytes".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let locator = format!("{}/source/photo.jpg", server.uri());
        let uploaded = client
            .upload(&locator, &UploadOptions::for_folder("defaults"))
            .await
            .unwrap();

        assert_eq!(uploaded.hosted_url, "https://cdn.example.com/photo.jpg");
    }

    #[tokio::test]
    async fn test_remote_fetch_error_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/source/gone.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let locator = format!("{}/source/gone.png", server.uri());
        let result = client
            .upload(&locator, &UploadOptions::for_folder("defaults"))
            .await;

        assert!(matches!(result, Err(UploadError::FetchFailed { .. })));
    }

    #[tokio::test]
    async fn test_api_failure_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/images"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage exploded"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"data").unwrap();

        let client = client_for(&server);
        let result = client
            .upload(file.to_str().unwrap(), &UploadOptions::for_folder("services"))
            .await;

        match result {
            Err(UploadError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("storage exploded"));
            }
            other => panic!("expected Api error, got {:?}", other.map(|u| u.hosted_url)),
        }
    }

    #[tokio::test]
    async fn test_missing_local_file_is_read_failed() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = client
            .upload("/no/such/file.png", &UploadOptions::for_folder("services"))
            .await;

        assert!(matches!(result, Err(UploadError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_rejected() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = client
            .upload("ftp://host/file.png", &UploadOptions::for_folder("services"))
            .await;

        assert!(matches!(result, Err(UploadError::InvalidLocator(_))));
    }

    #[tokio::test]
    async fn test_bearer_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v0/images"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "url": "https://cdn.example.com/a.png" })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"data").unwrap();

        let client = HttpUploadClient::new(
            server.uri(),
            Auth::Bearer("tok".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();

        let uploaded = client
            .upload(file.to_str().unwrap(), &UploadOptions::for_folder("services"))
            .await
            .unwrap();
        assert_eq!(uploaded.hosted_url, "https://cdn.example.com/a.png");
    }
}
