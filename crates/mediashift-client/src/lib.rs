//! Mediashift Client Library
//!
//! This crate provides the upload abstraction consumed by the migration
//! engine and its two implementations: an HTTP client that pushes media to a
//! hosting API and a local-directory client used for dry runs and tests.
//!
//! # Locator resolution
//!
//! The client resolves a `source_locator` itself: `http://` and `https://`
//! locators are fetched remotely, anything else is read from the local
//! filesystem. The engine places no constraint on transport.

pub mod factory;
pub mod http;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_upload_client;
pub use http::{Auth, HttpUploadClient};
pub use local::LocalUploadClient;
pub use mediashift_core::ClientBackend;
pub use traits::{UploadClient, UploadError, UploadOptions, UploadResult, UploadedMedia};
