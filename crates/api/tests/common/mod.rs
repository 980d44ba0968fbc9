#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use assetdesk_api::assets::AssetStore;
use assetdesk_api::config::ServerConfig;
use assetdesk_api::router::build_app_router;
use assetdesk_api::state::AppState;
use assetdesk_storage::config::StorageConfig;
use assetdesk_storage::local::LocalDisk;
use assetdesk_storage::logo::LogoManager;
use assetdesk_storage::Disk;
use assetdesk_storage::DiskRegistry;

/// Smallest byte sequence recognised as a PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

/// A router plus the temporary directory backing its disks.
///
/// The directory is removed when this value is dropped, so keep it alive for
/// the whole test.
pub struct TestApp {
    pub router: Router,
    pub storage: TempDir,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Absolute path of a file on the named test disk.
    pub fn disk_path(&self, disk: &str, path: &str) -> PathBuf {
        self.storage.path().join(disk).join(path)
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Disks live under `root`: `public`, `local` and a filesystem stand-in for
/// `cloud`, each in its own subdirectory.
pub fn test_config(root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_body_bytes: 8 * 1024 * 1024,
        logo_disk: "public".to_string(),
        export_disk: "cloud".to_string(),
        export_output: "assets".to_string(),
        storage: StorageConfig {
            public_root: root.join("public"),
            public_url: "/storage".to_string(),
            local_root: root.join("local"),
            cloud: None,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery, body
/// limit) that production uses.
pub async fn build_test_app(pool: PgPool) -> TestApp {
    let storage = tempfile::tempdir().unwrap();
    let config = test_config(storage.path());

    let mut disks = DiskRegistry::from_config(&config.storage).await;
    disks.register(Arc::new(LocalDisk::new(
        "cloud",
        storage.path().join("cloud"),
        None,
    )));

    let logo_disk: Arc<dyn Disk> = disks.get(&config.logo_disk).unwrap();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        disks: Arc::new(disks),
        assets: Arc::new(AssetStore::new(pool, LogoManager::new(logo_disk))),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(json.to_string()),
        Some("application/json".to_string()),
    )
    .await
}

pub async fn post_form(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    send_form(app, Method::POST, uri, form).await
}

pub async fn put_form(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    send_form(app, Method::PUT, uri, form).await
}

async fn send_form(app: Router, method: Method, uri: &str, form: MultipartForm) -> Response<Body> {
    let content_type = form.content_type();
    send(app, method, uri, Body::from(form.into_bytes()), Some(content_type)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "assetdesk-test-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// The full valid form for an asset.
pub fn asset_form(name: &str, symbol: &str, asset_type: &str, description: &str) -> MultipartForm {
    MultipartForm::new()
        .text("name", name)
        .text("symbol", symbol)
        .text("type", asset_type)
        .text("decimals", "8")
        .text("description", description)
}

/// Create an asset through the API and return its JSON `data`.
pub async fn create_asset(test: &TestApp, form: MultipartForm) -> serde_json::Value {
    let response = post_form(test.app(), "/api/v1/assets", form).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
