// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card generation endpoint handler

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::client_identity::client_identity;
use super::response::{card_response, wants_json};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::cards::{build_card_prompt, CardParams};

/// POST /api/generate - Generate a trading card image
///
/// Pipeline:
/// 1. Image provider configured? (503 if not)
/// 2. Parse and validate the card parameters (400)
/// 3. Consume one slot of the caller's quota (429 when exhausted)
/// 4. Compose the prompt
/// 5. Call the image provider once
/// 6. Return PNG bytes or the JSON envelope
pub async fn generate_card_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();

    // 1. Credential check happens before anything touches the body or quota
    let provider = state.image_provider.clone().ok_or_else(|| {
        warn!("[{}] Image provider not configured", request_id);
        ApiError::not_configured()
    })?;

    // 2. Parse + validate
    let params: CardParams = serde_json::from_slice(&body).map_err(|e| {
        warn!("[{}] Card request body rejected: {}", request_id, e);
        ApiError::invalid_body(e)
    })?;
    let card = state.validator.validate(&params).map_err(|e| {
        warn!("[{}] Card validation failed: {}", request_id, e);
        ApiError::from(e)
    })?;

    // 3. Quota
    let client_id = client_identity(&headers);
    let decision = state.rate_limiter.check_rate_limit(&client_id);
    if !decision.allowed {
        return Err(ApiError::RateLimitExceeded {
            reset_at: decision.reset_at,
        });
    }

    // 4. Prompt
    let prompt = build_card_prompt(&card);
    debug!(
        "[{}] Card prompt composed: client={}, frame={:?}, prompt_len={}",
        request_id,
        client_id,
        card.frame_style,
        prompt.len()
    );

    // 5. Generate
    let image = provider.generate(&prompt).await.map_err(|e| {
        warn!("[{}] Card generation failed: {}", request_id, e);
        ApiError::from(e)
    })?;

    info!(
        "[{}] Card generated: model={}, {}ms, remaining={}",
        request_id, image.model, image.processing_time_ms, decision.remaining
    );

    // 6. Shape
    card_response(
        image,
        decision.remaining,
        wants_json(&headers, state.response_mode),
    )
}

/// GET /api/generate - The endpoint only accepts POST
pub async fn generate_card_get_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Use POST" })),
    )
}
