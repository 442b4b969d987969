//! End-to-end migration tests over the local upload backend.
//!
//! Run with: `cargo test -p mediashift-engine --test migration_test`

use mediashift_client::LocalUploadClient;
use mediashift_core::MigrationItem;
use mediashift_engine::{enumerate_fixed_list, enumerate_local_files, MigrationEngine};
use std::sync::Arc;
use tempfile::tempdir;

fn image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

async fn local_client(dest: &std::path::Path) -> Arc<LocalUploadClient> {
    Arc::new(
        LocalUploadClient::new(dest, "http://localhost:3000/media".to_string())
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn test_full_run_enumerate_upload_report() {
    let source = tempdir().unwrap();
    std::fs::write(source.path().join("logo.png"), b"png bytes").unwrap();
    std::fs::write(source.path().join("banner.webp"), b"webp bytes").unwrap();
    std::fs::write(source.path().join("notes.txt"), b"not an image").unwrap();

    let dest = tempdir().unwrap();
    let client = local_client(dest.path()).await;

    let items = enumerate_local_files(
        source.path(),
        "/images/services",
        &image_extensions(),
        "services",
    )
    .await
    .unwrap();
    assert_eq!(items.len(), 2);

    let engine = MigrationEngine::new(client);
    let report = engine.run(&items).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.migrated_count(), 2);
    assert_eq!(
        report.hosted_url("/images/services/logo.png"),
        Some("http://localhost:3000/media/services/logo.png")
    );
    assert!(dest.path().join("services/logo.png").exists());
    assert!(dest.path().join("services/banner.webp").exists());
    assert!(!dest.path().join("services/notes.txt").exists());
}

#[tokio::test]
async fn test_missing_directory_does_not_block_other_items() {
    let dest = tempdir().unwrap();
    let client = local_client(dest.path()).await;

    let missing = dest.path().join("not-there");
    let local_items =
        enumerate_local_files(&missing, "/images/services", &image_extensions(), "services")
            .await
            .unwrap();
    assert!(local_items.is_empty());

    // Keys may differ from locators; here public URLs are remapped while the
    // bytes come from staged files.
    let staged = tempdir().unwrap();
    std::fs::write(staged.path().join("hero.jpg"), b"jpeg bytes").unwrap();
    let items = vec![MigrationItem::new(
        "https://images.example.com/hero.jpg",
        staged.path().join("hero.jpg").to_string_lossy().into_owned(),
        "defaults",
    )];

    let engine = MigrationEngine::new(client);
    let report = engine.run(&items).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(
        report.hosted_url("https://images.example.com/hero.jpg"),
        Some("http://localhost:3000/media/defaults/hero.jpg")
    );
}

#[tokio::test]
async fn test_partial_failure_yields_partial_mapping() {
    let source = tempdir().unwrap();
    std::fs::write(source.path().join("ok.png"), b"fine").unwrap();

    let dest = tempdir().unwrap();
    let client = local_client(dest.path()).await;

    let mut items = enumerate_local_files(
        source.path(),
        "/images/services",
        &image_extensions(),
        "services",
    )
    .await
    .unwrap();
    // A locator that cannot be read must not block the rest of the run.
    items.insert(
        0,
        MigrationItem::new(
            "/images/services/ghost.png",
            source.path().join("ghost.png").to_string_lossy().into_owned(),
            "services",
        ),
    );

    let engine = MigrationEngine::new(client);
    let report = engine.run(&items).await.unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.migrated_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures[0].key, "/images/services/ghost.png");
    assert!(report.hosted_url("/images/services/ok.png").is_some());
}

#[tokio::test]
async fn test_report_serializes_flat_mapping() {
    let source = tempdir().unwrap();
    std::fs::write(source.path().join("a.png"), b"a").unwrap();

    let dest = tempdir().unwrap();
    let client = local_client(dest.path()).await;

    let items = enumerate_local_files(
        source.path(),
        "/images/services",
        &image_extensions(),
        "services",
    )
    .await
    .unwrap();

    let report = MigrationEngine::new(client).run(&items).await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value["mapping"]["/images/services/a.png"],
        "http://localhost:3000/media/services/a.png"
    );
    assert_eq!(value["failures"].as_array().unwrap().len(), 0);
    assert!(value["migration_id"].is_string());
}

#[tokio::test]
async fn test_fixed_list_items_fail_cleanly_on_local_backend() {
    // Remote locators are the http backend's job; the local backend records
    // them as per-item failures rather than aborting the run.
    let dest = tempdir().unwrap();
    let client = local_client(dest.path()).await;

    let urls = vec!["https://images.example.com/one.jpg".to_string()];
    let items = enumerate_fixed_list(&urls, "defaults");

    let report = MigrationEngine::new(client).run(&items).await.unwrap();

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.failures[0].key, urls[0]);
}
