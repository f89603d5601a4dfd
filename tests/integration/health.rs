use crate::common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::test_app();

    let response = common::send(
        &app,
        Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = common::test_app();

    let response = common::send(
        &app,
        Request::builder()
            .uri("/api/v1/nothing-here")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
