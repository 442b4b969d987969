//! Report assembly.
//!
//! Partitions per-item results into the successful mapping and the failure
//! list, preserving processing order within each partition, and applies the
//! configured duplicate-key merge policy.

use chrono::{DateTime, Utc};
use mediashift_core::{
    FailureEntry, MappingEntry, MergePolicy, MigrationError, MigrationOutcome, MigrationReport,
    MigrationResult,
};
use std::collections::HashSet;
use uuid::Uuid;

/// Accumulates `MigrationResult`s and builds the final report.
///
/// `started_at` is captured at construction, so build the builder before
/// processing begins for accurate run timing.
pub struct ReportBuilder {
    merge_policy: MergePolicy,
    started_at: DateTime<Utc>,
    results: Vec<MigrationResult>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        ReportBuilder {
            merge_policy: MergePolicy::default(),
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn push(&mut self, result: MigrationResult) {
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = MigrationResult>) {
        self.results.extend(results);
    }

    /// Build the report. Fails only under `RejectDuplicates` when two
    /// results share a key; the other policies always succeed.
    pub fn build(self) -> Result<MigrationReport, MigrationError> {
        let mut mapping: Vec<MappingEntry> = Vec::new();
        let mut failures: Vec<FailureEntry> = Vec::new();
        let mut seen: HashSet<String> = HashSet::with_capacity(self.results.len());

        for result in self.results {
            let duplicate = !seen.insert(result.key.clone());
            if duplicate && self.merge_policy == MergePolicy::RejectDuplicates {
                return Err(MigrationError::DuplicateKey(result.key));
            }

            match result.outcome {
                MigrationOutcome::Success { hosted_url } => {
                    match mapping.iter_mut().find(|entry| entry.key == result.key) {
                        Some(existing) if self.merge_policy == MergePolicy::LastWriteWins => {
                            // Keep the first occurrence's position, take the
                            // later URL.
                            existing.hosted_url = hosted_url;
                        }
                        Some(_) => {}
                        None => mapping.push(MappingEntry {
                            key: result.key,
                            hosted_url,
                        }),
                    }
                }
                MigrationOutcome::Failure { reason } => failures.push(FailureEntry {
                    key: result.key,
                    reason,
                }),
            }
        }

        Ok(MigrationReport {
            migration_id: Uuid::new_v4(),
            started_at: self.started_at,
            completed_at: Utc::now(),
            mapping,
            failures,
        })
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
