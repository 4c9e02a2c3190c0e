//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use omoide_api::auth::jwt::{generate_token, JwtConfig};
use omoide_api::config::ServerConfig;
use omoide_api::jobs::registry::JobRegistry;
use omoide_api::router::build_app_router;
use omoide_api::state::AppState;
use omoide_storage::local::LocalStorage;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a throwaway local storage directory.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    // A single storage directory shared by every app built in this test
    // process, so a file uploaded through one app instance is visible to the
    // next (tests rebuild the router between requests).
    static STORAGE_DIR: std::sync::OnceLock<std::path::PathBuf> = std::sync::OnceLock::new();
    let dir = STORAGE_DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("temp storage dir");
        let path = dir.path().to_path_buf();
        // Keep the directory alive for the rest of the test process.
        Box::leak(Box::new(dir));
        path
    });
    let storage = Arc::new(LocalStorage::new(dir.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        jobs: Arc::new(JobRegistry::new()),
    };

    build_app_router(state, &config)
}

/// Mint a Bearer token for the given LINE subject, signed with the test
/// secret. The first request carrying it provisions the user row.
pub fn auth_token(subject: &str, name: &str) -> String {
    generate_token(subject, Some(name), None, &test_config().jwt).expect("token generation")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<(&str, Vec<u8>)>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some((content_type, bytes)) => builder
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(bytes))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// GET without authentication (for /health and 401 tests).
pub async fn get_unauthed(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Authenticated GET.
pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// Authenticated POST with a JSON body.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some(("application/json", body.to_string().into_bytes())),
    )
    .await
}

/// Authenticated PUT with a JSON body.
pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Some(token),
        Some(("application/json", body.to_string().into_bytes())),
    )
    .await
}

/// Authenticated DELETE.
pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// One part of a multipart upload: `(field name, filename, content type, bytes)`.
/// Text fields pass `None` for filename and content type.
pub type MultipartPart<'a> = (&'a str, Option<&'a str>, Option<&'a str>, Vec<u8>);

/// Authenticated POST with a hand-assembled `multipart/form-data` body.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: &str,
    parts: Vec<MultipartPart<'_>>,
) -> Response<Body> {
    let boundary = "omoide-test-boundary";
    let mut body = Vec::new();
    for (name, filename, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    send(
        app,
        Method::POST,
        uri,
        Some(token),
        Some((&format!("multipart/form-data; boundary={boundary}"), body)),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "Response body is not valid JSON: {e}\nbody: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}
