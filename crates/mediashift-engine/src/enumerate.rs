//! Resource enumerators.
//!
//! Enumerators produce the ordered sequence of migration items. Local files
//! keep the directory's read order; fixed URL lists keep input order. Both
//! orders are deterministic for a given source, which is what the report's
//! ordering contract builds on.

use mediashift_core::{MigrationError, MigrationItem};
use std::ffi::OsStr;
use std::path::Path;
use tokio::fs;

/// Enumerate migratable files in `dir`.
///
/// Each item's key is `{public_prefix}/{filename}`, the public-facing path
/// the rest of the system references the file by; its locator is the
/// filesystem path. Files whose extension is not in `extensions`
/// (case-insensitive) are silently skipped, as are subdirectories. A missing
/// directory is a warning, not an error: it yields an empty sequence so the
/// run can continue with other sources.
pub async fn enumerate_local_files(
    dir: &Path,
    public_prefix: &str,
    extensions: &[String],
    target_folder: &str,
) -> Result<Vec<MigrationItem>, MigrationError> {
    let enumeration_error = |source: std::io::Error| MigrationError::Enumeration {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                directory = %dir.display(),
                "Source directory does not exist; skipping local files"
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(enumeration_error(e)),
    };

    let prefix = public_prefix.trim_end_matches('/');
    let mut items = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(enumeration_error)? {
        let file_type = entry.file_type().await.map_err(enumeration_error)?;
        if !file_type.is_file() {
            continue;
        }

        let name_os = entry.file_name();
        let name = match name_os.to_str() {
            Some(name) => name,
            None => {
                tracing::warn!(
                    path = %entry.path().display(),
                    "Skipping file with non-UTF-8 name"
                );
                continue;
            }
        };

        if !has_allowed_extension(name, extensions) {
            continue;
        }

        let key = format!("{}/{}", prefix, name);
        items.push(MigrationItem::new(
            key,
            entry.path().to_string_lossy().into_owned(),
            target_folder,
        ));
    }

    tracing::info!(
        directory = %dir.display(),
        count = items.len(),
        "Enumerated local files"
    );

    Ok(items)
}

/// Enumerate a fixed list of remote URLs, preserving input order. Each URL
/// is both the item's key and its locator.
pub fn enumerate_fixed_list(urls: &[String], target_folder: &str) -> Vec<MigrationItem> {
    urls.iter()
        .map(|url| MigrationItem::new(url.clone(), url.clone(), target_folder))
        .collect()
}

fn has_allowed_extension(filename: &str, extensions: &[String]) -> bool {
    Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
