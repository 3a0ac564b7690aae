// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card generation response shaping

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::config::ResponseMode;
use crate::generation::{GeneratedImage, ImagePayload};

pub const REMAINING_HEADER: &str = "x-remaining";

/// JSON envelope for a generated card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCardResponse {
    pub success: bool,
    /// Hosted URL or `data:image/png;base64,...`
    pub image_url: String,
    /// Generations left in the caller's window
    pub remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Whether the caller gets the JSON envelope instead of raw PNG bytes
pub fn wants_json(headers: &HeaderMap, mode: ResponseMode) -> bool {
    match mode {
        ResponseMode::JsonOnly => true,
        ResponseMode::Negotiate => headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|accept| accept.contains("application/json"))
            .unwrap_or(false),
    }
}

/// Turn a provider image into the HTTP response
pub fn card_response(
    image: GeneratedImage,
    remaining: u32,
    json: bool,
) -> Result<Response, ApiError> {
    let image_url = match image.payload {
        ImagePayload::Base64Png(b64) if !json => {
            let bytes = STANDARD
                .decode(b64.as_bytes())
                .map_err(|e| ApiError::internal(format!("invalid base64 image: {}", e)))?;
            return Ok(png_response(bytes, remaining));
        }
        ImagePayload::Base64Png(b64) => format!("data:image/png;base64,{}", b64),
        ImagePayload::Url(url) => url,
    };

    Ok(Json(GenerateCardResponse {
        success: true,
        image_url,
        remaining,
        revised_prompt: image.revised_prompt,
    })
    .into_response())
}

fn png_response(bytes: Vec<u8>, remaining: u32) -> Response {
    let remaining = HeaderValue::from(remaining);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=card.png"),
            ),
            (header::HeaderName::from_static(REMAINING_HEADER), remaining),
            (
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static("X-Remaining"),
            ),
        ],
        bytes,
    )
        .into_response()
}
