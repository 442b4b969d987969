//! Mediashift CLI — batch media migration to a hosting service.
//!
//! Set MEDIASHIFT_API_URL and MEDIASHIFT_API_KEY for the http backend, or
//! MEDIASHIFT_BACKEND=local with MEDIASHIFT_LOCAL_DIR and
//! MEDIASHIFT_LOCAL_BASE_URL for dry runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediashift_cli::{init_tracing, parse_url_list};
use mediashift_client::create_upload_client;
use mediashift_core::{Config, MergePolicy};
use mediashift_engine::{enumerate_fixed_list, enumerate_local_files, MigrationEngine};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediashift", about = "Batch media migration to a hosting service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate local files and remote URLs to the configured media host
    Migrate {
        /// Directory of local files to migrate
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Public path prefix used as the mapping key for local files
        #[arg(long, default_value = "/images/services")]
        public_prefix: String,
        /// Destination folder for local files
        #[arg(long, default_value = "services")]
        folder: String,
        /// Remote URL to migrate (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,
        /// File listing remote URLs, one per line (# comments allowed)
        #[arg(long)]
        urls_file: Option<PathBuf>,
        /// Destination folder for remote URLs
        #[arg(long, default_value = "defaults")]
        url_folder: String,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Maximum uploads in flight (overrides MEDIASHIFT_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Duplicate-key policy: last-write-wins, first-write-wins, reject-duplicates
        #[arg(long)]
        merge_policy: Option<MergePolicy>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            dir,
            public_prefix,
            folder,
            urls,
            urls_file,
            url_folder,
            out,
            concurrency,
            merge_policy,
        } => {
            let config =
                Config::from_env().context("Failed to load configuration from environment")?;

            let mut items = Vec::new();

            if let Some(dir) = &dir {
                let local = enumerate_local_files(
                    dir,
                    &public_prefix,
                    &config.allowed_extensions,
                    &folder,
                )
                .await?;
                items.extend(local);
            }

            let mut all_urls = urls;
            if let Some(path) = &urls_file {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read URL list {}", path.display()))?;
                all_urls.extend(parse_url_list(&contents));
            }
            items.extend(enumerate_fixed_list(&all_urls, &url_folder));

            if items.is_empty() {
                tracing::warn!("Nothing to migrate; pass --dir and/or --url/--urls-file");
            }

            let client = create_upload_client(&config)
                .await
                .context("Failed to create upload client")?;

            let engine = MigrationEngine::new(client)
                .with_merge_policy(merge_policy.unwrap_or(config.merge_policy))
                .with_concurrency(concurrency.unwrap_or(config.concurrency));

            let report = engine.run(&items).await?;

            let json = serde_json::to_string_pretty(&report).context("Serialize report")?;
            match &out {
                Some(path) => {
                    std::fs::write(path, &json)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    tracing::info!(path = %path.display(), "Report written");
                }
                None => println!("{}", json),
            }

            tracing::info!(
                migrated = report.migrated_count(),
                failed = report.failed_count(),
                "Migration complete"
            );

            if !report.is_complete() {
                for failure in &report.failures {
                    tracing::warn!(key = %failure.key, reason = %failure.reason, "Failed item");
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
