#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use cityguide_api::auth::google::{IdentityVerifier, VerifiedIdentity};
use cityguide_api::auth::password::hash_password;
use cityguide_api::auth::session::start_session;
use cityguide_api::config::{AdminCredentials, ServerConfig};
use cityguide_api::router::build_app_router;
use cityguide_api::state::AppState;
use cityguide_api::storage::PhotoStore;
use cityguide_core::error::CoreError;
use cityguide_db::models::user::{NewUser, User};
use cityguide_db::repositories::UserRepo;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@test.local";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

/// Tokens the fake verifier accepts look like `google:<email>`.
pub const GOOGLE_TOKEN_PREFIX: &str = "google:";

fn admin_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).unwrap())
}

/// Accepts `google:<email>` and rejects everything else.
pub struct FakeVerifier;

#[async_trait]
impl IdentityVerifier for FakeVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, CoreError> {
        let email = id_token
            .strip_prefix(GOOGLE_TOKEN_PREFIX)
            .filter(|e| e.contains('@'))
            .ok_or_else(|| CoreError::Unauthorized("Invalid token".into()))?;
        Ok(VerifiedIdentity {
            email: email.to_string(),
            name: "Google User".to_string(),
        })
    }
}

/// Build a test `ServerConfig` that stores uploads under `upload_dir`.
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_bytes: 16 * 1024 * 1024,
        session_expiry_days: 7,
        admin: AdminCredentials {
            email: ADMIN_EMAIL.to_string(),
            password_hash: admin_password_hash().to_string(),
        },
        google_client_id: "test-client".to_string(),
    }
}

/// The production router over a throwaway upload directory.
///
/// The directory lives as long as the `TestApp`.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub uploads: TempDir,
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let config = test_config(&uploads);

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        photos: Arc::new(PhotoStore::new(config.upload_dir.clone())),
        verifier: Arc::new(FakeVerifier),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send_json(Method::GET, uri, None, None).await
    }

    pub async fn get_as(&self, uri: &str, token: &str) -> Response<Body> {
        self.send_json(Method::GET, uri, None, Some(token)).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send_json(Method::POST, uri, Some(body), None).await
    }

    pub async fn post_json_as(
        &self,
        uri: &str,
        body: serde_json::Value,
        token: &str,
    ) -> Response<Body> {
        self.send_json(Method::POST, uri, Some(body), Some(token)).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send_json(Method::PUT, uri, Some(body), None).await
    }

    pub async fn put_json_as(
        &self,
        uri: &str,
        body: serde_json::Value,
        token: &str,
    ) -> Response<Body> {
        self.send_json(Method::PUT, uri, Some(body), Some(token)).await
    }

    pub async fn put_as(&self, uri: &str, token: &str) -> Response<Body> {
        self.send_json(Method::PUT, uri, None, Some(token)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send_json(Method::DELETE, uri, None, None).await
    }

    pub async fn delete_as(&self, uri: &str, token: &str) -> Response<Body> {
        self.send_json(Method::DELETE, uri, None, Some(token)).await
    }

    /// POST a multipart body with one `file` part.
    pub async fn upload(&self, uri: &str, filename: &str, bytes: &[u8]) -> Response<Body> {
        let (content_type, body) = multipart_body("file", filename, bytes);
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Create (or reuse) an admin user and return a live session token.
    pub async fn admin_token(&self) -> String {
        self.session_for("moderator@test.local", true).await.1
    }

    /// Create (or reuse) a regular user and return a live session token.
    pub async fn user_token(&self) -> String {
        self.session_for("resident@test.local", false).await.1
    }

    pub async fn session_for(&self, email: &str, is_admin: bool) -> (User, String) {
        let user = UserRepo::find_or_create(
            &self.pool,
            &NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap().to_string(),
                is_admin,
            },
        )
        .await
        .unwrap();
        let token = start_session(&self.pool, user.id, 7).await.unwrap();
        (user, token)
    }
}

/// Build a `multipart/form-data` body with a single file part.
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "cityguide-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// A translucent PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([16, 185, 129, 200]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
