//! Actor header extraction tests.
//!
//! The actor extractor runs before any database access, so its rejections
//! can be exercised against the full router without a live database.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn missing_actor_headers_rejected() {
    let app = common::build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/projects/1/cancel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "UNAUTHORIZED_ROLE");
}

#[tokio::test]
async fn malformed_actor_id_rejected() {
    let app = common::build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/projects/1/cancel")
                .header("x-actor-id", "not-a-number")
                .header("x-actor-role", "administrator")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_actor_role_rejected() {
    let app = common::build_test_app();

    let response = app
        .oneshot(
            Request::post("/api/v1/projects/1/cancel")
                .header("x-actor-id", "3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
