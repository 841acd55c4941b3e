//! Integration tests for the nested block endpoints.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use docshelf_entity::user::UserRole;
use helpers::{Session, TestApp};

async fn document(app: &TestApp, admin: &Session, title: &str) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/docs/documents",
            Some(json!({ "title": title, "is_published": true })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

async fn block(app: &TestApp, admin: &Session, document_id: i64, body: Value) -> Value {
    let response = app
        .request(
            "POST",
            &format!("/api/docs/documents/{document_id}/blocks"),
            Some(body),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

fn contents(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("block list")
        .iter()
        .map(|b| b["content"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_blocks_are_admin_only() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let user = app.session("alice", UserRole::User).await;
    let doc = document(&app, &admin, "Guide").await;
    let path = format!("/api/docs/documents/{doc}/blocks");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let read = app.request("GET", &path, None, Some(&user)).await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);

    let write = app
        .request(
            "POST",
            &path,
            Some(json!({ "block_type": "text", "content": "hi" })),
            Some(&user),
        )
        .await;
    assert_eq!(write.status, StatusCode::FORBIDDEN);

    let invalid_body = app
        .request("POST", &path, Some(json!({ "block_type": 7 })), Some(&user))
        .await;
    assert_eq!(invalid_body.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_block_crud() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let doc = document(&app, &admin, "Guide").await;

    let created = block(
        &app,
        &admin,
        doc,
        json!({ "block_type": "code", "content": "fn main() {}", "language": "rust", "order": 1 }),
    )
    .await;
    assert_eq!(created["block_type"], "code");
    assert_eq!(created["language"], "rust");
    assert_eq!(created["order"], 1);
    assert!(created.get("document_id").is_none());
    let id = created["id"].as_i64().unwrap();
    let path = format!("/api/docs/documents/{doc}/blocks/{id}");

    let fetched = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["content"], "fn main() {}");

    let updated = app
        .request(
            "PUT",
            &path,
            Some(json!({ "block_type": "text", "content": "Plain now" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["block_type"], "text");
    assert_eq!(updated.body["content"], "Plain now");
    assert_eq!(updated.body["language"], "rust");
    assert_eq!(updated.body["order"], 1);

    let incomplete = app
        .request("PUT", &path, Some(json!({ "content": "x" })), Some(&admin))
        .await;
    assert_eq!(incomplete.status, StatusCode::BAD_REQUEST);

    let detail = app
        .request("GET", "/api/docs/documents/guide", None, Some(&admin))
        .await;
    assert_eq!(detail.body["blocks"][0]["content"], "Plain now");

    let deleted = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &path, None, Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["message"], "Block not found");
}

#[tokio::test]
async fn test_block_create_validation() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let doc = document(&app, &admin, "Guide").await;
    let path = format!("/api/docs/documents/{doc}/blocks");

    let cases = [
        json!({ "content": "no type" }),
        json!({ "block_type": "text" }),
        json!({ "block_type": "text", "content": "   " }),
        json!({ "block_type": "image", "content": "x" }),
        json!({ "block_type": "code", "content": "x", "language": "l".repeat(51) }),
    ];
    for body in cases {
        let response = app
            .request("POST", &path, Some(body.clone()), Some(&admin))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_blocks_list_in_order() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let doc = document(&app, &admin, "Guide").await;

    block(&app, &admin, doc, json!({ "block_type": "text", "content": "b", "order": 2 })).await;
    block(&app, &admin, doc, json!({ "block_type": "text", "content": "a", "order": 1 })).await;
    block(&app, &admin, doc, json!({ "block_type": "text", "content": "c", "order": 2 })).await;

    let list = app
        .request("GET", &format!("/api/docs/documents/{doc}/blocks"), None, Some(&admin))
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(contents(&list.body), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_reorder_is_scoped_to_parent() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let guide = document(&app, &admin, "Guide").await;
    let other = document(&app, &admin, "Other").await;

    let first = block(&app, &admin, guide, json!({ "block_type": "text", "content": "first", "order": 1 })).await;
    let second = block(&app, &admin, guide, json!({ "block_type": "text", "content": "second", "order": 2 })).await;
    let foreign = block(&app, &admin, other, json!({ "block_type": "text", "content": "foreign", "order": 1 })).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/docs/documents/{guide}/blocks/reorder"),
            Some(json!({ "items": [
                { "id": first["id"], "order": 3 },
                { "id": second["id"], "order": 0 },
                { "id": foreign["id"], "order": 99 },
            ] })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "reordered");

    let guide_blocks = app
        .request("GET", &format!("/api/docs/documents/{guide}/blocks"), None, Some(&admin))
        .await;
    assert_eq!(contents(&guide_blocks.body), vec!["second", "first"]);

    let foreign_id = foreign["id"].as_i64().unwrap();
    let untouched = app
        .request(
            "GET",
            &format!("/api/docs/documents/{other}/blocks/{foreign_id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(untouched.body["order"], 1);
}

#[tokio::test]
async fn test_block_lookup_is_scoped_to_parent() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let guide = document(&app, &admin, "Guide").await;
    let other = document(&app, &admin, "Other").await;
    let created = block(&app, &admin, guide, json!({ "block_type": "text", "content": "x" })).await;
    let id = created["id"].as_i64().unwrap();

    let cross = app
        .request("GET", &format!("/api/docs/documents/{other}/blocks/{id}"), None, Some(&admin))
        .await;
    assert_eq!(cross.status, StatusCode::NOT_FOUND);

    let cross_delete = app
        .request("DELETE", &format!("/api/docs/documents/{other}/blocks/{id}"), None, Some(&admin))
        .await;
    assert_eq!(cross_delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let doc = document(&app, &admin, "Guide").await;

    let unknown_parent = app
        .request("GET", "/api/docs/documents/424242/blocks", None, Some(&admin))
        .await;
    assert_eq!(unknown_parent.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_parent.body["message"], "Document not found");

    let slug_parent = app
        .request("GET", "/api/docs/documents/guide/blocks", None, Some(&admin))
        .await;
    assert_eq!(slug_parent.status, StatusCode::NOT_FOUND);

    let bad_block = app
        .request("GET", &format!("/api/docs/documents/{doc}/blocks/abc"), None, Some(&admin))
        .await;
    assert_eq!(bad_block.status, StatusCode::NOT_FOUND);

    let unknown_block = app
        .request("GET", &format!("/api/docs/documents/{doc}/blocks/999"), None, Some(&admin))
        .await;
    assert_eq!(unknown_block.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_document_removes_blocks() {
    let app = TestApp::new().await;
    let admin = app.session("root", UserRole::Admin).await;
    let doc = document(&app, &admin, "Guide").await;
    block(&app, &admin, doc, json!({ "block_type": "text", "content": "x" })).await;

    let deleted = app
        .request("DELETE", "/api/docs/documents/guide", None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM document_blocks")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
