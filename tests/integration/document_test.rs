//! Integration tests for the document endpoints.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use docshelf_entity::user::UserRole;
use helpers::{Session, TestApp};

const DOCUMENTS: &str = "/api/docs/documents";

async fn create(app: &TestApp, admin: &Session, body: Value) -> Value {
    let response = app.request("POST", DOCUMENTS, Some(body), Some(admin)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

fn slugs(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("list body")
        .iter()
        .map(|d| d["slug"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_admin_creates_document() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;

    let body = create(&app, &admin, json!({ "title": "Getting Started" })).await;
    assert_eq!(body["title"], "Getting Started");
    assert_eq!(body["slug"], "getting-started");
    assert_eq!(body["author_username"], "root");
    assert_eq!(body["is_published"], false);
    assert_eq!(body["order"], 0);
    assert_eq!(body["likes_count"], 0);
    assert_eq!(body["is_liked"], false);
    assert!(body["author"].as_i64().is_some());
    assert!(body["blocks"].as_array().unwrap().is_empty());
    assert!(body["created_at"].is_string());

    let explicit = create(
        &app,
        &admin,
        json!({ "title": "Other", "slug": "custom_slug", "is_published": true, "order": 4 }),
    )
    .await;
    assert_eq!(explicit["slug"], "custom_slug");
    assert_eq!(explicit["order"], 4);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    create(&app, &admin, json!({ "title": "Intro" })).await;

    let cases = [
        json!({}),
        json!({ "title": "" }),
        json!({ "title": "x".repeat(201) }),
        json!({ "title": "Intro" }),
        json!({ "title": "Fine", "slug": "not a slug" }),
        json!({ "title": "!!!" }),
    ];
    for body in cases {
        let response = app
            .request("POST", DOCUMENTS, Some(body.clone()), Some(&admin))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_write_permissions() {
    let app = TestApp::new().await;
    let user = app.session("alice", UserRole::User).await;

    let anonymous = app
        .request("POST", DOCUMENTS, Some(json!({ "title": "Nope" })), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forbidden = app
        .request("POST", DOCUMENTS, Some(json!({ "title": "Nope" })), Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_permission_is_checked_before_body() {
    let app = TestApp::new().await;
    let user = app.session("alice", UserRole::User).await;

    let invalid = app
        .request("POST", DOCUMENTS, Some(json!({ "title": "" })), Some(&user))
        .await;
    assert_eq!(invalid.status, StatusCode::FORBIDDEN);

    let garbage = app
        .request_with_headers(
            "POST",
            DOCUMENTS,
            None,
            &[
                ("Cookie", &user.cookie_header()),
                ("Content-Type", "text/plain"),
            ],
        )
        .await;
    assert_eq!(garbage.status, StatusCode::FORBIDDEN);

    let anonymous = app
        .request("PATCH", "/api/docs/documents/reorder", Some(json!([1, 2])), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_visibility_of_unpublished_documents() {
    let mut config = helpers::test_config();
    config.documents.allow_anonymous_read = true;
    let app = TestApp::with_config(config).await;
    let admin = app.session("root", UserRole::Admin).await;
    let user = app.session("alice", UserRole::User).await;

    create(&app, &admin, json!({ "title": "Draft" })).await;
    create(&app, &admin, json!({ "title": "Public", "is_published": true })).await;

    let anonymous = app.request("GET", DOCUMENTS, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(slugs(&anonymous.body), vec!["public"]);
    let summary = &anonymous.body[0];
    assert!(summary.get("blocks").is_none());
    assert!(summary.get("created_at").is_none());

    let as_user = app.request("GET", DOCUMENTS, None, Some(&user)).await;
    assert_eq!(slugs(&as_user.body), vec!["public"]);

    let as_admin = app.request("GET", DOCUMENTS, None, Some(&admin)).await;
    assert_eq!(as_admin.body.as_array().unwrap().len(), 2);

    let draft = app.request("GET", "/api/docs/documents/draft", None, None).await;
    assert_eq!(draft.status, StatusCode::NOT_FOUND);
    let draft = app
        .request("GET", "/api/docs/documents/draft", None, Some(&user))
        .await;
    assert_eq!(draft.status, StatusCode::NOT_FOUND);
    let draft = app
        .request("GET", "/api/docs/documents/draft", None, Some(&admin))
        .await;
    assert_eq!(draft.status, StatusCode::OK);

    let missing = app
        .request("GET", "/api/docs/documents/nothing-here", None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Document not found");
}

#[tokio::test]
async fn test_anonymous_reads_are_off_by_default() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let user = app.session("alice", UserRole::User).await;
    create(&app, &admin, json!({ "title": "Public", "is_published": true })).await;

    let list = app.request("GET", DOCUMENTS, None, None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);
    assert_eq!(list.body["error"], "UNAUTHORIZED");

    let detail = app.request("GET", "/api/docs/documents/public", None, None).await;
    assert_eq!(detail.status, StatusCode::UNAUTHORIZED);

    let authed = app.request("GET", DOCUMENTS, None, Some(&user)).await;
    assert_eq!(authed.status, StatusCode::OK);
    assert_eq!(slugs(&authed.body), vec!["public"]);
}

#[tokio::test]
async fn test_list_order() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;

    create(&app, &admin, json!({ "title": "Third", "order": 3 })).await;
    create(&app, &admin, json!({ "title": "First", "order": 1 })).await;
    create(&app, &admin, json!({ "title": "Second", "order": 2 })).await;

    let list = app.request("GET", DOCUMENTS, None, Some(&admin)).await;
    assert_eq!(slugs(&list.body), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_update_keeps_slug() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let created = create(&app, &admin, json!({ "title": "Intro" })).await;

    let patched = app
        .request(
            "PATCH",
            "/api/docs/documents/intro",
            Some(json!({ "title": "Introduction", "slug": "renamed" })),
            Some(&admin),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["title"], "Introduction");
    assert_eq!(patched.body["slug"], "intro");
    assert_eq!(patched.body["is_published"], false);
    assert_eq!(patched.body["created_at"], created["created_at"]);

    let published = app
        .request(
            "PATCH",
            "/api/docs/documents/intro",
            Some(json!({ "is_published": true })),
            Some(&admin),
        )
        .await;
    assert_eq!(published.body["title"], "Introduction");
    assert_eq!(published.body["is_published"], true);

    let replaced = app
        .request(
            "PUT",
            "/api/docs/documents/intro",
            Some(json!({ "title": "Intro Again", "order": 9 })),
            Some(&admin),
        )
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["order"], 9);

    let put_without_title = app
        .request(
            "PUT",
            "/api/docs/documents/intro",
            Some(json!({ "order": 1 })),
            Some(&admin),
        )
        .await;
    assert_eq!(put_without_title.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request(
            "PATCH",
            "/api/docs/documents/ghost",
            Some(json!({ "title": "x" })),
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_document() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let user = app.session("alice", UserRole::User).await;
    create(&app, &admin, json!({ "title": "Doomed", "is_published": true })).await;

    let forbidden = app
        .request("DELETE", "/api/docs/documents/doomed", None, Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", "/api/docs/documents/doomed", None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", "/api/docs/documents/doomed", None, Some(&admin))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", "/api/docs/documents/doomed", None, Some(&admin))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_toggles() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let user = app.session("alice", UserRole::User).await;
    create(&app, &admin, json!({ "title": "Liked", "is_published": true })).await;
    create(&app, &admin, json!({ "title": "Hidden" })).await;

    let path = "/api/docs/documents/liked/like";

    let anonymous = app.request("POST", path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let liked = app.request("POST", path, None, Some(&user)).await;
    assert_eq!(liked.status, StatusCode::CREATED);
    assert_eq!(liked.body["status"], "liked");

    let detail = app
        .request("GET", "/api/docs/documents/liked", None, Some(&user))
        .await;
    assert_eq!(detail.body["likes_count"], 1);
    assert_eq!(detail.body["is_liked"], true);

    let other_view = app
        .request("GET", "/api/docs/documents/liked", None, Some(&admin))
        .await;
    assert_eq!(other_view.body["likes_count"], 1);
    assert_eq!(other_view.body["is_liked"], false);

    let unliked = app.request("POST", path, None, Some(&user)).await;
    assert_eq!(unliked.status, StatusCode::OK);
    assert_eq!(unliked.body["status"], "unliked");

    let detail = app
        .request("GET", "/api/docs/documents/liked", None, Some(&user))
        .await;
    assert_eq!(detail.body["likes_count"], 0);

    let hidden = app
        .request("POST", "/api/docs/documents/hidden/like", None, Some(&user))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_documents() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let a = create(&app, &admin, json!({ "title": "Alpha", "order": 1 })).await;
    let b = create(&app, &admin, json!({ "title": "Beta", "order": 2 })).await;

    let response = app
        .request(
            "PATCH",
            "/api/docs/documents/reorder",
            Some(json!({ "items": [
                { "id": a["id"], "order": 5 },
                { "id": b["id"], "order": 0 },
                { "id": 999_999, "order": 1 },
            ] })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "reordered");

    let list = app.request("GET", DOCUMENTS, None, Some(&admin)).await;
    assert_eq!(slugs(&list.body), vec!["beta", "alpha"]);

    let empty = app
        .request("PATCH", "/api/docs/documents/reorder", Some(json!({})), Some(&admin))
        .await;
    assert_eq!(empty.status, StatusCode::OK);

    let user = app.session("alice", UserRole::User).await;
    let forbidden = app
        .request("PATCH", "/api/docs/documents/reorder", Some(json!({})), Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;

    let response = app
        .request(
            "POST",
            DOCUMENTS,
            Some(json!({ "title": 42 })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
