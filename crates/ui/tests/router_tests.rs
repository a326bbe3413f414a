//! Route tests for the embedded room page

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use neurallink_ui::{router, PageModel, APP_JS_PATH, STYLES_PATH};
use tower::ServiceExt;

async fn get(path: &str) -> (StatusCode, Option<String>, String) {
    let app = router(PageModel::new("wss://demo.livekit.cloud", "/api/token"));
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_serves_rendered_page() {
    let (status, content_type, body) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("livekit-client"));
    assert!(body.contains(r#""tokenEndpoint":"/api/token""#));
    assert!(!body.contains("{{PAGE_MODEL}}"));
}

#[tokio::test]
async fn test_script_asset() {
    let (status, content_type, body) = get(APP_JS_PATH).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/javascript"));
    assert!(body.contains("setMicrophoneEnabled"));
}

#[tokio::test]
async fn test_stylesheet_asset() {
    let (status, content_type, body) = get(STYLES_PATH).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/css"));
    assert!(body.contains(".glass-panel"));
}

#[tokio::test]
async fn test_unknown_path() {
    let (status, _, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_script_attaches_camera_tracks_once() {
    let (_, _, body) = get(APP_JS_PATH).await;

    let start = body.find("function renderVideo()").unwrap();
    let end = start + body[start..].find("\n    }\n").unwrap();
    let render = &body[start..end];
    assert!(!render.contains("attach("));

    let start = body.find("function onTrackSubscribed(").unwrap();
    let end = start + body[start..].find("\n    }\n").unwrap();
    assert_eq!(body[start..end].matches("track.attach()").count(), 2);
}
