//! Mediashift Engine Library
//!
//! The batch-migration core: enumerators that produce the ordered item
//! sequence, the engine that drives an `UploadClient` over it with per-item
//! failure isolation, and the report builder that assembles the final
//! mapping.

pub mod engine;
pub mod enumerate;
pub mod report;

// Re-export commonly used types
pub use engine::MigrationEngine;
pub use enumerate::{enumerate_fixed_list, enumerate_local_files};
pub use report::ReportBuilder;
