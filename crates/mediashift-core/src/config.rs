//! Configuration module
//!
//! Environment-driven configuration for a migration run. The config is
//! constructed once at process start and passed by reference into the
//! client factory; the engine never reads the environment itself.

use std::env;
use std::str::FromStr;

use crate::backend::ClientBackend;
use crate::models::MergePolicy;

// Common defaults
const UPLOAD_TIMEOUT_SECS: u64 = 60;
const CONCURRENCY: usize = 1;
const ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,webp";

/// Authentication scheme for the HTTP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `X-API-Key: {key}`
    ApiKey,
    /// `Authorization: Bearer {key}`
    Bearer,
}

impl FromStr for AuthScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api-key" | "apikey" | "x-api-key" => Ok(AuthScheme::ApiKey),
            "bearer" => Ok(AuthScheme::Bearer),
            _ => Err(anyhow::anyhow!("Invalid auth scheme: {}", s)),
        }
    }
}

/// Application configuration (migration run).
#[derive(Clone, Debug)]
pub struct Config {
    pub backend: ClientBackend,
    // HTTP backend
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub auth_scheme: AuthScheme,
    pub upload_timeout_secs: u64,
    // Local backend
    pub local_dir: Option<String>,
    pub local_base_url: Option<String>,
    // Enumeration
    pub allowed_extensions: Vec<String>,
    // Engine
    pub concurrency: usize,
    pub merge_policy: MergePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let backend = env::var("MEDIASHIFT_BACKEND")
            .unwrap_or_else(|_| "http".to_string())
            .parse::<ClientBackend>()?;

        let allowed_extensions = env::var("MEDIASHIFT_ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| ALLOWED_EXTENSIONS.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            backend,
            api_url: env::var("MEDIASHIFT_API_URL")
                .or_else(|_| env::var("API_URL"))
                .ok()
                .filter(|s| !s.is_empty()),
            api_key: env::var("MEDIASHIFT_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .ok()
                .filter(|s| !s.is_empty()),
            auth_scheme: env::var("MEDIASHIFT_AUTH_SCHEME")
                .unwrap_or_else(|_| "api-key".to_string())
                .parse()?,
            upload_timeout_secs: env::var("MEDIASHIFT_TIMEOUT_SECS")
                .unwrap_or_else(|_| UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(UPLOAD_TIMEOUT_SECS),
            local_dir: env::var("MEDIASHIFT_LOCAL_DIR").ok().filter(|s| !s.is_empty()),
            local_base_url: env::var("MEDIASHIFT_LOCAL_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            allowed_extensions,
            concurrency: env::var("MEDIASHIFT_CONCURRENCY")
                .unwrap_or_else(|_| CONCURRENCY.to_string())
                .parse()
                .unwrap_or(CONCURRENCY),
            merge_policy: env::var("MEDIASHIFT_MERGE_POLICY")
                .unwrap_or_else(|_| "last-write-wins".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.backend {
            ClientBackend::Http => {
                if self.api_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "MEDIASHIFT_API_URL must be set when using the http backend"
                    ));
                }
                if self.api_key.is_none() {
                    return Err(anyhow::anyhow!(
                        "MEDIASHIFT_API_KEY must be set when using the http backend"
                    ));
                }
            }
            ClientBackend::Local => {
                if self.local_dir.is_none() {
                    return Err(anyhow::anyhow!(
                        "MEDIASHIFT_LOCAL_DIR must be set when using the local backend"
                    ));
                }
                if self.local_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "MEDIASHIFT_LOCAL_BASE_URL must be set when using the local backend"
                    ));
                }
            }
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "MEDIASHIFT_ALLOWED_EXTENSIONS must name at least one extension"
            ));
        }

        if self.concurrency == 0 {
            return Err(anyhow::anyhow!(
                "MEDIASHIFT_CONCURRENCY must be at least 1"
            ));
        }

        Ok(())
    }
}
