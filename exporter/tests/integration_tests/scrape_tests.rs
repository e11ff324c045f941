//! Integration tests for the scrape endpoint.
//!
//! Tests cover:
//! - Publishing the registered users count after each update cycle
//! - Scan failure policies as observed by a scraper

use axum::http::StatusCode;
use exporter::ScanFailurePolicy;
use std::fs::{self, File};
use tempfile::tempdir;

use super::common::{get, make_user, sample, test_app};

#[tokio::test]
async fn test_gauge_follows_pins_directory() {
    let root = tempdir().unwrap();
    make_user(root.path(), "userA", 3);
    make_user(root.path(), "userB", 0);
    File::create(root.path().join("readme.txt")).unwrap();

    let (app, _state, monitor) = test_app(root.path(), ScanFailurePolicy::Keep);

    // Nothing published before the first cycle
    let (status, body) = get(app.clone(), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sample(&body, "cryptpad_registered_users"), Some(0.0));

    monitor.update_once().await.unwrap();
    let (_, body) = get(app.clone(), "/metrics").await;
    assert_eq!(sample(&body, "cryptpad_registered_users"), Some(3.0));
    assert_eq!(sample(&body, "cryptpad_user_folders"), Some(2.0));

    make_user(root.path(), "userC", 2);
    monitor.update_once().await.unwrap();
    let (_, body) = get(app, "/metrics").await;
    assert_eq!(sample(&body, "cryptpad_registered_users"), Some(5.0));
    assert_eq!(sample(&body, "cryptpad_scan_errors_total"), Some(0.0));
}

#[tokio::test]
async fn test_scrape_exposes_help_text() {
    let root = tempdir().unwrap();
    let (app, _state, _monitor) = test_app(root.path(), ScanFailurePolicy::Keep);

    let (_, body) = get(app, "/metrics").await;
    assert!(body.contains("# HELP cryptpad_registered_users Number of registered users"));
    assert!(body.contains("# TYPE cryptpad_registered_users gauge"));
}

#[tokio::test]
async fn test_failed_scan_keeps_last_value() {
    let root = tempdir().unwrap();
    let pins = root.path().join("pins");
    fs::create_dir(&pins).unwrap();
    make_user(&pins, "userA", 6);

    let (app, _state, monitor) = test_app(&pins, ScanFailurePolicy::Keep);
    monitor.update_once().await.unwrap();

    fs::remove_dir_all(&pins).unwrap();
    assert!(monitor.update_once().await.is_err());

    let (_, body) = get(app, "/metrics").await;
    assert_eq!(sample(&body, "cryptpad_registered_users"), Some(6.0));
    assert_eq!(sample(&body, "cryptpad_scan_errors_total"), Some(1.0));
    assert!(sample(&body, "cryptpad_last_scan_success_timestamp_seconds").unwrap() > 0.0);
}

#[tokio::test]
async fn test_failed_scan_publishes_zero_with_zero_policy() {
    let root = tempdir().unwrap();
    let pins = root.path().join("pins");
    fs::create_dir(&pins).unwrap();
    make_user(&pins, "userA", 6);

    let (app, _state, monitor) = test_app(&pins, ScanFailurePolicy::Zero);
    monitor.update_once().await.unwrap();

    fs::remove_dir_all(&pins).unwrap();
    assert!(monitor.update_once().await.is_err());

    let (_, body) = get(app, "/metrics").await;
    assert_eq!(sample(&body, "cryptpad_registered_users"), Some(0.0));
    assert_eq!(sample(&body, "cryptpad_scan_errors_total"), Some(1.0));
}

#[tokio::test]
async fn test_missing_pins_dir_never_published() {
    let root = tempdir().unwrap();
    let (app, state, monitor) = test_app(&root.path().join("absent"), ScanFailurePolicy::Keep);

    assert!(monitor.update_once().await.is_err());

    let (_, body) = get(app, "/metrics").await;
    assert_eq!(sample(&body, "cryptpad_last_scan_success_timestamp_seconds"), Some(0.0));
    assert_eq!(state.metrics().registered_users(), 0);
}
