// ABOUTME: HTTP integration tests for health and readiness endpoints
// ABOUTME: Exercises /health and /ready through the full router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_health_endpoint() {
    let router = common::create_test_router().await.unwrap();

    let response = AxumTestRequest::get("/health").send(router).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint_reports_backend() {
    let router = common::create_test_router().await.unwrap();

    let response = AxumTestRequest::get("/ready").send(router).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["backend"], "native");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = common::create_test_router().await.unwrap();

    let response = AxumTestRequest::get("/api/nothing-here").send(router).await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let router = common::create_test_router().await.unwrap();

    let response = AxumTestRequest::options("/api/diet/recommend")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send(router)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("http://localhost:5173")
    );
}
