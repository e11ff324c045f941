//! Common test utilities and helpers for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use exporter::{create_router, AppState, PinsMonitor, ScanFailurePolicy};
use http_body_util::BodyExt;
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

/// Creates a test router with a fresh registry and a monitor over `pins_dir`.
///
/// # Returns
///
/// A tuple containing the router, the app state and the monitor.
pub fn test_app(pins_dir: &Path, policy: ScanFailurePolicy) -> (Router, AppState, PinsMonitor) {
    let state = AppState::with_fresh_registry().unwrap();
    let monitor = PinsMonitor::new(state.clone(), pins_dir, Duration::from_secs(30), policy);
    let router = create_router(state.clone());
    (router, state, monitor)
}

/// Creates a user folder holding `entries` pin files.
pub fn make_user(root: &Path, name: &str, entries: usize) {
    let dir = root.join(name);
    fs::create_dir(&dir).unwrap();
    for i in 0..entries {
        File::create(dir.join(format!("{i}.ndjson"))).unwrap();
    }
}

/// Helper to make a GET request.
///
/// # Returns
///
/// A tuple containing the response status code and the body as text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Extracts the value of an unlabelled sample from a text exposition.
pub fn sample(body: &str, name: &str) -> Option<f64> {
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (metric, value) = line.split_once(' ')?;
            (metric == name).then(|| value.trim().parse().ok()).flatten()
        })
}
