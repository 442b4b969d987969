//! Error types module
//!
//! Errors that can abort a migration run before processing begins. Per-item
//! upload failures are deliberately NOT represented here: they are recorded
//! as `Failure` results inside the report and never propagate out of the
//! engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Duplicate item key: {0}")]
    DuplicateKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to enumerate {path}: {source}")]
    Enumeration {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid merge policy: {0}")]
    InvalidMergePolicy(String),
}
