use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{get, login_as, post, send, ADMIN_EMAIL, EXPLORER_EMAIL};

fn contest_body() -> serde_json::Value {
    json!({
        "title": "Neural Networks",
        "description": "Layers, activations and backprop",
        "time_limit": 15,
        "start_date": "2024-06-01",
        "end_date": "2024-06-30",
        "max_attempts": 1
    })
}

#[tokio::test]
async fn test_admin_routes_reject_members() {
    let app = common::create_test_app();
    let member = login_as(&app, EXPLORER_EMAIL).await;

    let (status, _) = post(&app, "/admin/contests", Some(&member), contest_body()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post(&app, "/admin/contests", None, contest_body()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_builds_and_runs_a_contest() {
    let app = common::create_test_app();
    let admin = login_as(&app, ADMIN_EMAIL).await;

    let (status, contest) = post(&app, "/admin/contests", Some(&admin), contest_body()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contest["created_by"], "admin");
    assert_eq!(contest["is_active"], true);
    assert!(contest["challenges"].as_array().unwrap().is_empty());
    let contest_id = contest["id"].as_str().unwrap();

    for (question, points) in [("What is ReLU?", 10), ("What is backprop?", 20)] {
        let (status, challenge) = post(
            &app,
            &format!("/admin/contests/{}/challenges", contest_id),
            Some(&admin),
            json!({
                "question": question,
                "type": "text",
                "correct_answer": "gradient",
                "points": points,
                "difficulty": "medium"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(challenge["contest_id"], contest_id);
    }

    let member = login_as(&app, EXPLORER_EMAIL).await;
    let (status, view) = get(&app, &format!("/api/v1/contests/{}", contest_id), Some(&member)).await;
    assert_eq!(status, StatusCode::OK);
    let challenges = view["challenges"].as_array().unwrap();
    assert_eq!(challenges.len(), 2);
    assert_eq!(challenges[0]["question"], "What is ReLU?");
    assert_eq!(challenges[1]["type"], "text");
}

#[tokio::test]
async fn test_deactivated_contest_leaves_member_listing() {
    let app = common::create_test_app();
    let admin = login_as(&app, ADMIN_EMAIL).await;

    let (status, updated) = send(
        &app,
        "PATCH",
        "/admin/contests/contest2",
        Some(&admin),
        Some(json!({ "is_active": false, "max_attempts": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["max_attempts"], 5);
    assert_eq!(updated["title"], "Python for AI");

    let member = login_as(&app, EXPLORER_EMAIL).await;
    let (_, listed) = get(&app, "/api/v1/contests", Some(&member)).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, listed) = get(&app, "/api/v1/contests?include_inactive=true", Some(&admin)).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_contest_payload_is_rejected() {
    let app = common::create_test_app();
    let admin = login_as(&app, ADMIN_EMAIL).await;

    let mut body = contest_body();
    body["title"] = json!("");
    let (status, error) = post(&app, "/admin/contests", Some(&admin), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "validation");
}

#[tokio::test]
async fn test_deleted_contest_keeps_attempts() {
    let app = common::create_test_app();
    let admin = login_as(&app, ADMIN_EMAIL).await;
    let member = login_as(&app, EXPLORER_EMAIL).await;

    let (_, attempt) = post(
        &app,
        "/api/v1/contests/contest1/attempts",
        Some(&member),
        json!({}),
    )
    .await;
    let attempt_id = attempt["id"].as_str().unwrap();

    let (status, _) = send(&app, "DELETE", "/admin/contests/contest1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, "/api/v1/contests/contest1", Some(&member)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/admin/contests/contest1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, finished) = post(
        &app,
        &format!("/api/v1/attempts/{}/finish", attempt_id),
        Some(&member),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["is_completed"], true);
}
