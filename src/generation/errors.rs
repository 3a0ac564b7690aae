// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Errors from the image generation provider

use serde::Deserialize;
use thiserror::Error;

/// Provider error code for a prompt rejected by the usage policy
pub const CODE_CONTENT_POLICY: &str = "content_policy_violation";
/// Provider error code for provider-side throttling
pub const CODE_RATE_LIMIT: &str = "rate_limit_exceeded";
/// Provider error code for an exhausted billing account
pub const CODE_BILLING_LIMIT: &str = "billing_hard_limit_reached";

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Prompt refused by the provider's content policy
    #[error("Content policy violation: {message}")]
    ContentPolicy { message: String },

    /// Provider throttled the request
    #[error("Provider rate limited: {message}")]
    RateLimited { message: String },

    /// Provider account can no longer be billed
    #[error("Provider billing limit reached: {message}")]
    BillingLimit { message: String },

    /// Any other non-success answer from the provider
    #[error("Provider returned {status}: {message}")]
    Provider {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Provider answered with no images
    #[error("No image returned from provider")]
    EmptyResponse,

    /// Provider answered with neither inline data nor a URL
    #[error("No image data in provider response")]
    MissingImageData,

    /// Provider payload could not be decoded
    #[error("Invalid provider payload: {0}")]
    InvalidPayload(String),

    /// Request never completed
    #[error("Provider request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl GenerationError {
    /// Classify a non-success provider response
    pub fn from_provider_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ProviderErrorEnvelope>(body).ok();
        let code = parsed.as_ref().and_then(|e| e.error.code.clone());
        let message = parsed
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| body.to_string());

        match code.as_deref() {
            Some(CODE_CONTENT_POLICY) => GenerationError::ContentPolicy { message },
            Some(CODE_RATE_LIMIT) => GenerationError::RateLimited { message },
            Some(CODE_BILLING_LIMIT) => GenerationError::BillingLimit { message },
            None if status == 429 => GenerationError::RateLimited { message },
            _ => GenerationError::Provider {
                status,
                code,
                message,
            },
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GenerationError::InvalidPayload(e.to_string())
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}
