//! Viewer page and asset passthrough tests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_viewer_page_is_served() {
    let app = TestApp::new().await;

    let (status, body, headers) = app.get_raw("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().contains("html"));
    assert!(body.contains("/api/events"));
}

#[tokio::test]
async fn test_manifest_passthrough_serves_file_bytes() {
    let app = TestApp::new().await;

    let response = app.get("/manifest.json").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["slug"], "echo");
    assert_eq!(response.body["backendPath"], "src/backend.rs");
}

#[tokio::test]
async fn test_missing_bundle_is_404() {
    let app = TestApp::new().await;

    let (status, _, _) = app.get_raw("/bundle.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bundle_passthrough_once_built() {
    let app = TestApp::new().await;
    let dist = app.workspace.path().join("dist");
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("bundle.js"), "export default {};").unwrap();

    let (status, body, headers) = app.get_raw("/bundle.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/javascript");
    assert_eq!(body, "export default {};");
}

#[tokio::test]
async fn test_missing_icon_is_404() {
    let app = TestApp::new().await;

    let (status, _, _) = app.get_raw("/icon.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;

    let (status, _, _) = app.get_raw("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
