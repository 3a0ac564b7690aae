// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider failures surfaced through POST /api/generate

use axum::http::StatusCode;
use fabstir_card_node::{
    api::AppState,
    generation::{CardRateLimiter, GenerationError},
};
use std::sync::Arc;

use super::support::*;

async fn generate_with_failure(make_err: fn() -> GenerationError) -> (StatusCode, serde_json::Value, usize) {
    let provider = MockProvider::new(MockBehavior::Fail(make_err));
    let state = AppState::new_for_test()
        .with_provider(provider.clone())
        .with_rate_limiter(Arc::new(CardRateLimiter::new(3)));
    let app = app_with(state);

    let response = send(&app, post_card(VALID_CARD, Some("4.3.2.1"), None)).await;
    let status = response.status();
    (status, body_json(response).await, provider.calls())
}

#[tokio::test]
async fn test_content_policy_is_400() {
    let (status, json, calls) = generate_with_failure(|| GenerationError::ContentPolicy {
        message: "flagged".to_string(),
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONTENT_POLICY");
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_provider_throttling_is_429() {
    let (status, json, _) = generate_with_failure(|| GenerationError::RateLimited {
        message: "slow down".to_string(),
    })
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json["code"], "API_RATE_LIMIT");
}

#[tokio::test]
async fn test_billing_lockout_is_503() {
    let (status, json, _) = generate_with_failure(|| GenerationError::BillingLimit {
        message: "hard limit".to_string(),
    })
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
    assert_eq!(json["error"], "Service temporarily unavailable.");
}

#[tokio::test]
async fn test_empty_provider_response_is_500() {
    let (status, json, _) = generate_with_failure(|| GenerationError::EmptyResponse).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "Card generation failed");
    assert_eq!(json["details"], "No image returned from provider");
}

#[tokio::test]
async fn test_transport_failure_is_500() {
    let (status, json, calls) =
        generate_with_failure(|| GenerationError::Transport("connection reset".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    // Single attempt, no retry
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_failed_generation_still_counts_against_quota() {
    let provider = MockProvider::new(MockBehavior::Fail(|| GenerationError::EmptyResponse));
    let limiter = Arc::new(CardRateLimiter::new(1));
    let app = app_with(
        AppState::new_for_test()
            .with_provider(provider.clone())
            .with_rate_limiter(limiter),
    );

    let first = send(&app, post_card(VALID_CARD, Some("7.7.7.7"), None)).await;
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let second = send(&app, post_card(VALID_CARD, Some("7.7.7.7"), None)).await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(provider.calls(), 1);
}
