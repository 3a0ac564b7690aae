// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

use crate::cards::ValidationError;
use crate::generation::GenerationError;

/// Body of every failed POST /api/generate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Provider credential missing or provider billing locked out
    ServiceUnavailable(String),
    ValidationError {
        field: Option<String>,
        message: String,
    },
    /// Local per-client quota exhausted
    RateLimitExceeded {
        reset_at: DateTime<Utc>,
    },
    /// Provider refused the prompt
    ContentPolicy,
    /// Provider throttled us
    ApiRateLimit,
    InternalError {
        details: String,
    },
}

impl ApiError {
    pub fn not_configured() -> Self {
        ApiError::ServiceUnavailable("Service not configured".to_string())
    }

    pub fn invalid_body(reason: impl fmt::Display) -> Self {
        ApiError::ValidationError {
            field: None,
            message: format!("Invalid JSON body: {}", reason),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        ApiError::InternalError {
            details: details.into(),
        }
    }

    /// Wire error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            ApiError::ContentPolicy => "CONTENT_POLICY",
            ApiError::ApiRateLimit => "API_RATE_LIMIT",
            ApiError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (message, field, remaining, details) = match self {
            ApiError::ServiceUnavailable(msg) => (msg.clone(), None, None, None),
            ApiError::ValidationError { field, message } => {
                (message.clone(), field.clone(), None, None)
            }
            ApiError::RateLimitExceeded { .. } => (
                "Rate limit exceeded. Try again later.".to_string(),
                None,
                Some(0),
                None,
            ),
            ApiError::ContentPolicy => (
                "Prompt flagged by content policy. Try a different description.".to_string(),
                None,
                None,
                None,
            ),
            ApiError::ApiRateLimit => (
                "Image provider rate limit hit. Try again shortly.".to_string(),
                None,
                None,
                None,
            ),
            ApiError::InternalError { details } => (
                "Card generation failed".to_string(),
                None,
                None,
                Some(details.clone()),
            ),
        };

        ErrorResponse {
            error: message,
            code: self.code().to_string(),
            field,
            remaining,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } | ApiError::ContentPolicy => 400,
            ApiError::RateLimitExceeded { .. } | ApiError::ApiRateLimit => 429,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::InternalError { .. } => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::ValidationError { message, .. } => write!(f, "Validation error: {}", message),
            ApiError::RateLimitExceeded { reset_at } => {
                write!(f, "Rate limit exceeded until {}", reset_at)
            }
            ApiError::ContentPolicy => write!(f, "Prompt rejected by content policy"),
            ApiError::ApiRateLimit => write!(f, "Provider rate limit hit"),
            ApiError::InternalError { details } => write!(f, "Internal error: {}", details),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::ValidationError {
            field: Some(e.field.to_string()),
            message: e.message,
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::ContentPolicy { .. } => ApiError::ContentPolicy,
            GenerationError::RateLimited { .. } => ApiError::ApiRateLimit,
            GenerationError::BillingLimit { .. } => {
                ApiError::ServiceUnavailable("Service temporarily unavailable.".to_string())
            }
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Card request failed: {}", self);
        }

        let mut response = (status, Json(self.to_response())).into_response();
        if let ApiError::RateLimitExceeded { reset_at } = self {
            let retry_after = (reset_at - Utc::now()).num_seconds().max(0);
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
