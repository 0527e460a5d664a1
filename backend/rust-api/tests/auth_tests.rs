use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{get, login_as, post, send, EXPLORER_EMAIL, WIZARD_EMAIL};

#[tokio::test]
async fn test_register_returns_token_and_fresh_profile() {
    let app = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({ "username": "Newcomer", "email": "new@vaic.com", "password": "whatever" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["user"]["score"], 0);
    assert_eq!(body["user"]["role"], "user");

    let token = body["access_token"].as_str().unwrap();
    let (status, me) = get(&app, "/api/v1/auth/me", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "Newcomer");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({ "username": "Copy", "email": EXPLORER_EMAIL, "password": "x" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email_taken");
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/v1/auth/register",
        None,
        json!({ "username": "", "email": "blank@vaic.com", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, _) = post(&app, "/api/v1/auth/register", None, json!({ "email": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = common::create_test_app();

    let (status, body) = post(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": WIZARD_EMAIL, "password": "letmein" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = common::create_test_app();

    let (status, _) = get(&app, "/api/v1/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/v1/contests", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = common::create_test_app();
    let token = login_as(&app, WIZARD_EMAIL).await;

    let (status, _) = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/api/v1/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // a fresh login still works
    let again = login_as(&app, WIZARD_EMAIL).await;
    let (status, _) = get(&app, "/api/v1/auth/me", Some(&again)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_update_self_only() {
    let app = common::create_test_app();
    let explorer = login_as(&app, EXPLORER_EMAIL).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/v1/users/1",
        Some(&explorer),
        Some(json!({ "username": "AIPioneer", "student_id": "SV101" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "AIPioneer");
    assert_eq!(body["student_id"], "SV101");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/v1/users/2",
        Some(&explorer),
        Some(json!({ "username": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_user_score() {
    let app = common::create_test_app();

    let (status, body) = get(&app, "/api/v1/users/3/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 180);

    let (status, body) = get(&app, "/api/v1/users/nobody/score", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 0);
}
