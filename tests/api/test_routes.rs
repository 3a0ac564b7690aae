// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route registration tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use fabstir_card_node::api::AppState;

use super::support::*;

#[tokio::test]
async fn test_get_generate_returns_405() {
    let app = app_with(AppState::new_for_test());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/generate")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "error": "Use POST" }));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = app_with(AppState::new_for_test());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/cards")
        .body(Body::empty())
        .unwrap();

    assert_eq!(send(&app, request).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_without_provider() {
    let app = app_with(AppState::new_for_test());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["providerConfigured"], false);
    assert!(json.get("model").is_none());
    assert_eq!(json["rateLimit"]["maxPerWindow"], 3);
    assert_eq!(json["rateLimit"]["windowSecs"], 86_400);
}

#[tokio::test]
async fn test_health_reports_provider_model() {
    let app = app_with(AppState::new_for_test().with_provider(MockProvider::inline()));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let json = body_json(send(&app, request).await).await;
    assert_eq!(json["providerConfigured"], true);
    assert_eq!(json["model"], "mock-image-model");
}
