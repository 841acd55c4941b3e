//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use docshelf_api::app::{App, build_app};
use docshelf_api::state::AppState;
use docshelf_auth::PasswordHasher;
use docshelf_core::config::AppConfig;
use docshelf_database::DatabasePool;
use docshelf_database::repositories::UserRepository;
use docshelf_entity::user::{CreateUser, UserRole};

/// Password every helper-created account uses.
pub const PASSWORD: &str = "correct-horse-9";

/// Test application context
pub struct TestApp {
    /// The application under test
    pub app: App,
    /// Database pool for direct queries
    pub db_pool: SqlitePool,
    /// Application config
    pub config: AppConfig,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when empty or not JSON
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// The `Set-Cookie` value for `name`, if one was sent.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.set_cookies
            .iter()
            .find(|c| c.starts_with(&prefix))
            .map(String::as_str)
    }

    /// Just the value part of cookie `name`.
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.cookie(name).map(|c| {
            c[name.len() + 1..]
                .split(';')
                .next()
                .unwrap_or_default()
                .to_string()
        })
    }
}

/// Credentials for an authenticated test session.
#[derive(Debug, Clone)]
pub struct Session {
    pub access: String,
    pub refresh: String,
}

impl Session {
    /// `Cookie` header carrying both tokens.
    pub fn cookie_header(&self) -> String {
        format!("access_token={}; refresh_token={}", self.access, self.refresh)
    }
}

/// Default test configuration.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.secret_key = "integration-test-secret".into();
    config.database.url = "sqlite::memory:".into();
    config.cache.provider = "memory".into();
    config
}

impl TestApp {
    /// Create a new test application with the default test config.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a new test application with a custom config.
    pub async fn with_config(config: AppConfig) -> Self {
        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();
        docshelf_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::build(config.clone(), db_pool.clone())
            .await
            .expect("Failed to build state");

        Self {
            app: build_app(state),
            db_pool,
            config,
        }
    }

    /// Insert a user directly, bypassing registration.
    pub async fn create_user(&self, username: &str, role: UserRole) -> i64 {
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");
        UserRepository::new(self.db_pool.clone())
            .create(&CreateUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: hash,
                role,
            })
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Log in and return the token cookies.
    pub async fn login(&self, username: &str) -> Session {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);

        Session {
            access: response
                .cookie_value("access_token")
                .expect("No access_token cookie"),
            refresh: response
                .cookie_value("refresh_token")
                .expect("No refresh_token cookie"),
        }
    }

    /// Create a user with `role` and log them in.
    pub async fn session(&self, username: &str, role: UserRole) -> Session {
        self.create_user(username, role).await;
        self.login(username).await
    }

    /// Make a request, optionally authenticated with session cookies.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&Session>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(session) = session {
            req = req.header("Cookie", session.cookie_header());
        }
        self.send(req, body).await
    }

    /// Make a request with explicit extra headers.
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req, body).await
    }

    async fn send(&self, req: http::request::Builder, body: Option<Value>) -> TestResponse {
        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}
