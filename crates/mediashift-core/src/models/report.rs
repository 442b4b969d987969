use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::MigrationError;

/// Outcome of migrating one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationOutcome {
    Success { hosted_url: String },
    Failure { reason: String },
}

/// Result for one item, keyed by the originating item's `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationResult {
    pub key: String,
    #[serde(flatten)]
    pub outcome: MigrationOutcome,
}

impl MigrationResult {
    pub fn success(key: impl Into<String>, hosted_url: impl Into<String>) -> Self {
        MigrationResult {
            key: key.into(),
            outcome: MigrationOutcome::Success {
                hosted_url: hosted_url.into(),
            },
        }
    }

    pub fn failure(key: impl Into<String>, reason: impl Into<String>) -> Self {
        MigrationResult {
            key: key.into(),
            outcome: MigrationOutcome::Failure {
                reason: reason.into(),
            },
        }
    }
}

/// Conflict policy applied when two items share a `key`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// The most recently processed entry determines the final URL. The
    /// entry keeps its first position in the mapping, matching how
    /// re-assigning a key into a flat object behaves.
    #[default]
    LastWriteWins,
    /// The first processed entry wins; later duplicates are dropped.
    FirstWriteWins,
    /// Duplicate keys abort the run before any upload.
    RejectDuplicates,
}

impl FromStr for MergePolicy {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" | "last" => Ok(MergePolicy::LastWriteWins),
            "first-write-wins" | "first" => Ok(MergePolicy::FirstWriteWins),
            "reject-duplicates" | "reject" => Ok(MergePolicy::RejectDuplicates),
            _ => Err(MigrationError::InvalidMergePolicy(s.to_string())),
        }
    }
}

impl Display for MergePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MergePolicy::LastWriteWins => write!(f, "last-write-wins"),
            MergePolicy::FirstWriteWins => write!(f, "first-write-wins"),
            MergePolicy::RejectDuplicates => write!(f, "reject-duplicates"),
        }
    }
}

/// A successful `key` → hosted URL entry in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub key: String,
    pub hosted_url: String,
}

/// A failed entry: the item's key and the upload error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub key: String,
    pub reason: String,
}

/// Consolidated result of one migration run.
///
/// `mapping` holds only successful entries, insertion order = processing
/// order. It serializes as a flat `key` → URL object so downstream
/// substitution tooling can consume the report directly. `failures` keeps
/// the per-item error messages in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub migration_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_mapping")]
    pub mapping: Vec<MappingEntry>,
    pub failures: Vec<FailureEntry>,
}

fn serialize_mapping<S>(entries: &[MappingEntry], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for entry in entries {
        map.serialize_entry(&entry.key, &entry.hosted_url)?;
    }
    map.end()
}

impl MigrationReport {
    /// Look up the hosted URL recorded for a key.
    pub fn hosted_url(&self, key: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.hosted_url.as_str())
    }

    /// True when every item migrated. The caller decides success/failure
    /// framing (and exit status) from this.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn migrated_count(&self) -> usize {
        self.mapping.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}
