//! Mediashift Core Library
//!
//! This crate provides the domain models, error types, and configuration
//! shared across all Mediashift components: migration items, results, the
//! final report, and the environment-driven `Config`.

pub mod backend;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use backend::ClientBackend;
pub use config::{AuthScheme, Config};
pub use error::MigrationError;
pub use models::{
    FailureEntry, MappingEntry, MergePolicy, MigrationItem, MigrationOutcome, MigrationReport,
    MigrationResult,
};
