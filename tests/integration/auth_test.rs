//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;
use serde_json::json;

use docshelf_auth::JwtDecoder;
use docshelf_entity::user::UserRole;
use helpers::{PASSWORD, Session, TestApp};

#[tokio::test]
async fn test_register_creates_plain_user_without_tokens() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "s3cure-pass",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["role"], "user");
    assert!(response.body["id"].as_i64().is_some());
    assert!(response.body.get("password").is_none());
    assert!(response.set_cookies.is_empty());
}

#[tokio::test]
async fn test_register_twice_keeps_one_account() {
    let app = TestApp::new().await;
    let body = json!({ "username": "alice", "password": "s3cure-pass" });

    let first = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    let second = app
        .request("POST", "/api/auth/register", Some(body), None)
        .await;

    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "Username already exists");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = 'alice'")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let mut config = helpers::test_config();
    config.rate_limit.enabled = false;
    let app = TestApp::with_config(config).await;
    app.create_user("taken", UserRole::User).await;

    let cases = [
        json!({ "username": "taken", "password": "s3cure-pass" }),
        json!({ "username": "bob", "password": "short" }),
        json!({ "username": "bob", "password": "12345678901" }),
        json!({ "username": "bob", "email": "not-an-email", "password": "s3cure-pass" }),
        json!({ "username": "", "password": "s3cure-pass" }),
        json!({ "password": "s3cure-pass" }),
    ];

    for body in cases {
        let response = app
            .request("POST", "/api/auth/register", Some(body.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_login_sets_http_only_cookies() {
    let app = TestApp::new().await;
    app.create_user("alice", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], "alice");
    assert_eq!(response.body["user"]["role"], "user");
    assert!(response.body.get("access_token").is_none());

    let access = response.cookie("access_token").expect("access cookie");
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("SameSite=Lax"));
    assert!(access.contains("Path=/"));
    assert!(access.contains("Max-Age=3600"));
    assert!(access.contains("Secure"));

    let refresh = response.cookie("refresh_token").expect("refresh cookie");
    assert!(refresh.contains("HttpOnly"));
    assert!(refresh.contains("Max-Age=604800"));

    let decoder = JwtDecoder::new(&app.config.auth);
    let access_claims = decoder
        .decode_access_token(&response.cookie_value("access_token").unwrap())
        .expect("access cookie holds an access token");
    let refresh_claims = decoder
        .decode_refresh_token(&response.cookie_value("refresh_token").unwrap())
        .expect("refresh cookie holds a refresh token");
    assert_eq!(access_claims.user_id, response.body["user"]["id"].as_i64().unwrap());
    assert_eq!(access_claims.user_id, refresh_claims.user_id);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new().await;
    app.create_user("alice", UserRole::User).await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "nope-nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "mallory", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], "Invalid credentials");
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.set_cookies.is_empty());
    assert!(unknown_user.set_cookies.is_empty());
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_returns_user_and_csrf_cookie() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::Admin).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&session)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["role"], "admin");

    let csrf = response.cookie("csrftoken").expect("csrf cookie");
    assert!(!csrf.contains("HttpOnly"));
    assert!(csrf.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let bearer = format!("Bearer {}", session.access);
    let response = app
        .request_with_headers("GET", "/api/auth/me", None, &[("Authorization", &bearer)])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
}

#[tokio::test]
async fn test_invalid_token_is_rejected_even_where_anonymous_is_allowed() {
    let mut config = helpers::test_config();
    config.documents.allow_anonymous_read = true;
    let app = TestApp::with_config(config).await;
    let bogus = Session {
        access: "not.a.jwt".into(),
        refresh: String::new(),
    };

    let response = app
        .request("GET", "/api/docs/documents", None, Some(&bogus))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid or expired token");

    let anonymous = app.request("GET", "/api/docs/documents", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate_requests() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let swapped = Session {
        access: session.refresh.clone(),
        refresh: session.refresh.clone(),
    };
    let response = app.request("GET", "/api/auth/me", None, Some(&swapped)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_is_single_use() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let response = app
        .request("POST", "/api/auth/refresh", None, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["access"].as_str().unwrap().to_string();
    let refresh = response.body["refresh"].as_str().unwrap().to_string();
    assert_eq!(response.cookie_value("access_token").as_deref(), Some(access.as_str()));
    assert_eq!(response.cookie_value("refresh_token").as_deref(), Some(refresh.as_str()));

    let rotated = Session { access, refresh };
    let me = app.request("GET", "/api/auth/me", None, Some(&rotated)).await;
    assert_eq!(me.status, StatusCode::OK);

    let replay = app
        .request("POST", "/api/auth/refresh", None, Some(&session))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_refresh_from_json_body() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh": session.refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["access"].is_string());
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/refresh", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookies_and_revokes_refresh() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&session))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");
    assert!(response.cookie("access_token").unwrap().contains("Max-Age=0"));
    assert!(response.cookie("refresh_token").unwrap().contains("Max-Age=0"));

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh": session.refresh })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_change_applies_to_existing_tokens() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    sqlx::query("UPDATE users SET role = 'admin' WHERE username = 'alice'")
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&session)).await;
    assert_eq!(response.body["role"], "admin");

    sqlx::query("DELETE FROM users WHERE username = 'alice'")
        .execute(&app.db_pool)
        .await
        .unwrap();
    let response = app.request("GET", "/api/auth/me", None, Some(&session)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_credential_endpoints_are_rate_limited() {
    let mut config = helpers::test_config();
    config.rate_limit.window_seconds = 3600;
    let app = TestApp::with_config(config).await;

    for _ in 0..5 {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "username": "ghost", "password": "whatever1" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let sixth = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "ghost", "password": "whatever1" })),
            None,
        )
        .await;
    assert_eq!(sixth.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(sixth.body["error"], "RATE_LIMITED");

    // Scopes are counted separately.
    let register = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "fresh", "password": "s3cure-pass" })),
            None,
        )
        .await;
    assert_eq!(register.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_rate_limit_can_be_disabled() {
    let mut config = helpers::test_config();
    config.rate_limit.enabled = false;
    let app = TestApp::with_config(config).await;

    for _ in 0..7 {
        let response = app
            .request("POST", "/api/auth/register", Some(json!({})), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let app = TestApp::new().await;
    let session = app.session("alice", UserRole::User).await;

    let response = app.request("GET", "/api/auth/me/", None, Some(&session)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_dependencies() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["cache"], "connected");
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_spa_fallback_serves_index() {
    let dir = std::env::temp_dir().join(format!("docshelf-spa-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let index = dir.join("index.html");
    std::fs::write(&index, "<!doctype html><div id=\"app\"></div>").unwrap();

    let mut config = helpers::test_config();
    config.frontend.index_path = index.to_string_lossy().into_owned();
    let app = TestApp::with_config(config).await;

    let page = app
        .request_with_headers("GET", "/documents/intro", None, &[])
        .await;
    assert_eq!(page.status, StatusCode::OK);

    let post = app.request("POST", "/documents/intro", None, None).await;
    assert_eq!(post.status, StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_disallowed_host_is_rejected() {
    let mut config = helpers::test_config();
    config.server.allowed_hosts = vec!["localhost".into()];
    let app = TestApp::with_config(config).await;

    let ok = app
        .request_with_headers("GET", "/api/health", None, &[("Host", "localhost:8000")])
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let rejected = app
        .request_with_headers("GET", "/api/health", None, &[("Host", "evil.example")])
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
}
