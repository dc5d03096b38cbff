/// Common test utilities for integration tests
///
/// Builds the full router over the flat-file backend in a unique temp
/// directory, with one registered user and a valid access token. No
/// external services are required.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use planora_api::app::{build_router, AppState};
use planora_api::config::{ApiConfig, Config, JwtConfig, StorageBackend, StorageConfig};
use planora_api::seed::seed_bundled_templates;
use planora_shared::auth::jwt::{create_token, Claims, TokenType};
use planora_shared::auth::password::hash_password;
use planora_shared::models::user::{CreateUser, User};
use planora_shared::store::flatfile::FileStore;
use planora_shared::store::{Store, UserStore};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "Planning4ever";

/// Test context containing the app and an authenticated user
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<dyn Store>,
    pub user: User,
    pub jwt_token: String,
    data_dir: std::path::PathBuf,
}

impl TestContext {
    /// Creates a new test context over a fresh flat-file store
    pub async fn new() -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("planora-test-{}", Uuid::new_v4()));
        let store: Arc<dyn Store> = Arc::new(FileStore::open(&data_dir).await?);

        seed_bundled_templates(store.as_ref()).await?;

        let user = store
            .create_user(CreateUser {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                name: "Test User".to_string(),
                initials: "TU".to_string(),
                password_hash: Some(hash_password(TEST_PASSWORD)?),
                avatar_url: None,
                handle: None,
                wallet_address: None,
            })
            .await?;

        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, TEST_JWT_SECRET)?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            storage: StorageConfig {
                backend: StorageBackend::File,
                database_url: None,
                database_max_connections: 10,
                data_dir: data_dir.clone(),
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let state = AppState::new(store.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            app,
            store,
            user,
            jwt_token,
            data_dir,
        })
    }

    /// Returns the authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends an authenticated JSON request and returns status + body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        self.send(method, uri, body, Some(&self.auth_header())).await
    }

    /// Sends an unauthenticated JSON request
    pub async fn request_unauthed(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        self.send(method, uri, body, None).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        auth: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("request should not fail");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Creates a project via the API and returns its body
    pub async fn create_project(&self, name: &str) -> serde_json::Value {
        let (status, body) = self
            .request(
                "POST",
                "/v1/projects",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create project failed: {body}");
        body
    }

    /// Cleans up the temp data directory
    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
    }
}
