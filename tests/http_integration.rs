//! Live host tests
//!
//! Requests are driven through the axum router with `oneshot`, no socket.

use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use email_template_renderer::config::{ServerConfig, Settings, TemplatesConfig};
use email_template_renderer::server::{create_app, AppState};
use email_template_renderer::template::{render_view, RegistryOptions, ServiceRegistry};

fn manifest_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn app_for(root: PathBuf) -> Router {
    let settings = Settings {
        server: ServerConfig::default(),
        templates: TemplatesConfig {
            root: Some(root.to_string_lossy().into_owned()),
            ..TemplatesConfig::default()
        },
    };
    create_app(AppState::new(settings))
}

async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_path_maps_to_template() {
    let (status, body) = get(app_for(manifest_root()), "/EmailTemplate").await;

    let registry = ServiceRegistry::initialize(RegistryOptions::with_root(manifest_root())).unwrap();
    let expected = render_view(&registry, "Templates/EmailTemplate.html")
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_nested_path_maps_to_template() {
    let (status, body) = get(
        app_for(manifest_root()),
        "/Layouts/SaltedResponsiveEmailTemplate",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hi User"));
}

#[tokio::test]
async fn test_encoded_path_is_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("Templates/Welcome Mail.html");
    std::fs::create_dir_all(template.parent().unwrap()).unwrap();
    std::fs::write(&template, "Welcome {{ model.user_name }}").unwrap();

    let (status, body) = get(app_for(dir.path().to_path_buf()), "/Welcome%20Mail").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Welcome User");
}

#[tokio::test]
async fn test_path_with_invalid_utf8_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(app_for(dir.path().to_path_buf()), "/%FF").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "INVALID_PATH");
}

#[tokio::test]
async fn test_missing_template_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(app_for(dir.path().to_path_buf()), "/Missing").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"]["code"], "VIEW_NOT_FOUND");
}

#[tokio::test]
async fn test_fresh_render_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("Templates/Live.html");
    std::fs::create_dir_all(template.parent().unwrap()).unwrap();
    let app = app_for(dir.path().to_path_buf());

    std::fs::write(&template, "first").unwrap();
    let (_, body) = get(app.clone(), "/Live").await;
    assert_eq!(body, "first");

    std::fs::write(&template, "second").unwrap();
    let (_, body) = get(app, "/Live").await;
    assert_eq!(body, "second");
}
