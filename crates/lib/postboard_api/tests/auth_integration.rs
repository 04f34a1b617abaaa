//! Signup/login against a real PostgreSQL (`DATABASE_URL`).

mod common;

use axum::http::{Method, StatusCode};
use postboard_api::services::auth::verify_access_token;
use serde_json::json;

use common::{TEST_SECRET, TestDb, request, send};

async fn signup(app: &axum::Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        request(
            Method::POST,
            "/api/signup",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await
}

async fn login(app: &axum::Router, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        request(
            Method::POST,
            "/api/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ),
    )
    .await
}

#[tokio::test]
async fn signup_issues_a_usable_token() {
    let Some(db) = TestDb::connect().await else { return };
    let app = db.router();

    let (status, json) = signup(&app, "alice@example.com", "hunter22").await;
    assert_eq!(status, StatusCode::CREATED);
    let token = json["token"].as_str().expect("token string").to_string();
    assert_eq!(json.as_object().map(|o| o.len()), Some(1), "only the token is returned");

    let claims = verify_access_token(&token, TEST_SECRET.as_bytes()).expect("valid token");
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);

    let (status, json) = send(&app, request(Method::GET, "/api/posts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.is_array());

    db.teardown().await;
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_keeps_one_row() {
    let Some(db) = TestDb::connect().await else { return };
    let app = db.router();

    let (status, _) = signup(&app, "bob@example.com", "first-pass").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = signup(&app, "bob@example.com", "second-pass").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json, json!({ "error": "Email already in use" }));

    // Emails are normalized, so case and padding do not create a new identity.
    let (status, _) = signup(&app, "  BOB@Example.com ", "third-pass").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("bob@example.com")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    // The original password still works.
    let (status, _) = login(&app, "bob@example.com", "first-pass").await;
    assert_eq!(status, StatusCode::OK);

    db.teardown().await;
}

#[tokio::test]
async fn password_is_stored_hashed() {
    let Some(db) = TestDb::connect().await else { return };
    let app = db.router();

    signup(&app, "carol@example.com", "plain-text-pw").await;
    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
        .bind("carol@example.com")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_ne!(hash, "plain-text-pw");
    assert!(hash.starts_with("$2"));

    db.teardown().await;
}

#[tokio::test]
async fn login_returns_token_for_matching_credentials() {
    let Some(db) = TestDb::connect().await else { return };
    let app = db.router();

    signup(&app, "dave@example.com", "correct-pw").await;

    let (status, json) = login(&app, "Dave@Example.com", "correct-pw").await;
    assert_eq!(status, StatusCode::OK);
    let token = json["token"].as_str().expect("token string");
    let claims = verify_access_token(token, TEST_SECRET.as_bytes()).expect("valid token");
    assert_eq!(claims.email, "dave@example.com");

    db.teardown().await;
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let Some(db) = TestDb::connect().await else { return };
    let app = db.router();

    signup(&app, "erin@example.com", "correct-pw").await;

    let wrong_password = login(&app, "erin@example.com", "wrong-pw").await;
    let unknown_email = login(&app, "nobody@example.com", "correct-pw").await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1, json!({ "error": "Invalid credentials" }));

    db.teardown().await;
}
