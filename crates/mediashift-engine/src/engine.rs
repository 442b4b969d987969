//! Migration engine.
//!
//! Drives an `UploadClient` over the item sequence. The central contract is
//! per-item isolation: one bad file or unreachable URL never blocks the
//! remaining items. After processing begins, no error escapes `run`; every
//! upload failure becomes a `Failure` entry in the report.

use crate::report::ReportBuilder;
use futures::stream::{self, StreamExt};
use mediashift_client::{UploadClient, UploadOptions};
use mediashift_core::{MergePolicy, MigrationError, MigrationItem, MigrationReport, MigrationResult};
use std::collections::HashSet;
use std::sync::Arc;

pub struct MigrationEngine {
    client: Arc<dyn UploadClient>,
    merge_policy: MergePolicy,
    concurrency: usize,
}

impl MigrationEngine {
    pub fn new(client: Arc<dyn UploadClient>) -> Self {
        MigrationEngine {
            client,
            merge_policy: MergePolicy::default(),
            concurrency: 1,
        }
    }

    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    /// Maximum uploads in flight. Values above 1 run items through an
    /// order-preserving buffered stream, so the report still follows the
    /// input sequence regardless of completion order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the migration over `items`.
    ///
    /// The only error path is setup validation: under `RejectDuplicates`
    /// the key scan fails before any upload is attempted. Everything after
    /// that is per-item isolated.
    pub async fn run(&self, items: &[MigrationItem]) -> Result<MigrationReport, MigrationError> {
        if self.merge_policy == MergePolicy::RejectDuplicates {
            ensure_unique_keys(items)?;
        }

        tracing::info!(
            items = items.len(),
            backend = %self.client.backend_type(),
            concurrency = self.concurrency,
            "Starting migration run"
        );

        let mut builder = ReportBuilder::new().with_merge_policy(self.merge_policy);
        let total = items.len();

        if self.concurrency <= 1 {
            for (index, item) in items.iter().enumerate() {
                builder.push(self.process_item(index, total, item).await);
            }
        } else {
            let results: Vec<MigrationResult> = stream::iter(items.iter().enumerate())
                .map(|(index, item)| self.process_item(index, total, item))
                .buffered(self.concurrency)
                .collect()
                .await;
            builder.extend(results);
        }

        let report = builder.build()?;

        tracing::info!(
            migrated = report.migrated_count(),
            failed = report.failed_count(),
            "Migration run finished"
        );

        Ok(report)
    }

    async fn process_item(
        &self,
        index: usize,
        total: usize,
        item: &MigrationItem,
    ) -> MigrationResult {
        let start = std::time::Instant::now();

        tracing::info!(
            key = %item.key,
            locator = %item.source_locator,
            folder = %item.target_folder,
            "Uploading item {}/{}",
            index + 1,
            total
        );

        let options = UploadOptions {
            folder: item.target_folder.clone(),
            extra: item.upload_options.clone(),
        };

        match self.client.upload(&item.source_locator, &options).await {
            Ok(uploaded) => {
                tracing::info!(
                    key = %item.key,
                    hosted_url = %uploaded.hosted_url,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Item migrated"
                );
                MigrationResult::success(&item.key, uploaded.hosted_url)
            }
            Err(e) => {
                tracing::warn!(
                    key = %item.key,
                    locator = %item.source_locator,
                    error = %e,
                    "Item failed; continuing with remaining items"
                );
                MigrationResult::failure(&item.key, e.to_string())
            }
        }
    }
}

fn ensure_unique_keys(items: &[MigrationItem]) -> Result<(), MigrationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.key.as_str()) {
            return Err(MigrationError::DuplicateKey(item.key.clone()));
        }
    }
    Ok(())
}
