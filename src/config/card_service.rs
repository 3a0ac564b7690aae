// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the card generation service

use std::env;
use std::time::Duration;

use crate::generation::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_QUALITY, DEFAULT_SIZE};

/// How successful generations are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Raw PNG unless the caller accepts application/json
    Negotiate,
    /// Always the JSON envelope
    JsonOnly,
}

impl ResponseMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "negotiate" | "auto" => Some(ResponseMode::Negotiate),
            "json" | "json-only" => Some(ResponseMode::JsonOnly),
            _ => None,
        }
    }
}

/// Image provider settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider credential; generation is unavailable without it
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Output size, WIDTHxHEIGHT
    pub size: String,
    /// Quality tier
    pub quality: String,
}

/// Configuration for the card generation service
#[derive(Debug, Clone)]
pub struct CardServiceConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Image provider settings
    pub provider: ProviderConfig,
    /// Generations allowed per client per window
    pub rate_limit_max: u32,
    /// Quota window length in seconds
    pub rate_limit_window_secs: u64,
    /// Require `platform` and `external_user_id` on every request
    pub require_integration_identity: bool,
    /// Response shaping for successful generations
    pub response_mode: ResponseMode,
}

impl CardServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| {
            let port = lookup("API_PORT").unwrap_or_else(|| "8080".to_string());
            format!("0.0.0.0:{}", port)
        });

        Self {
            listen_addr,
            provider: ProviderConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
                endpoint: lookup("OPENAI_BASE_URL").unwrap_or(defaults.provider.endpoint),
                model: lookup("IMAGE_MODEL").unwrap_or(defaults.provider.model),
                size: lookup("IMAGE_SIZE").unwrap_or(defaults.provider.size),
                quality: lookup("IMAGE_QUALITY").unwrap_or(defaults.provider.quality),
            },
            rate_limit_max: lookup("CARD_RATE_LIMIT_MAX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: lookup("CARD_RATE_LIMIT_WINDOW_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_window_secs),
            require_integration_identity: lookup("REQUIRE_INTEGRATION_IDENTITY")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            response_mode: lookup("CARD_RESPONSE_MODE")
                .and_then(|v| ResponseMode::parse(&v))
                .unwrap_or(defaults.response_mode),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rate_limit_max == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }
        if self.rate_limit_window_secs == 0 {
            return Err("Rate limit window must be greater than 0".to_string());
        }
        let valid_size = self
            .provider
            .size
            .split_once('x')
            .map(|(w, h)| w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok())
            .unwrap_or(false);
        if !valid_size {
            return Err(format!(
                "invalid image size '{}'; expected WIDTHxHEIGHT",
                self.provider.size
            ));
        }
        Ok(())
    }

    /// Whether a provider credential is configured
    pub fn has_provider_credentials(&self) -> bool {
        self.provider.api_key.is_some()
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for CardServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            provider: ProviderConfig {
                api_key: None,
                endpoint: DEFAULT_ENDPOINT.to_string(),
                model: DEFAULT_MODEL.to_string(),
                size: DEFAULT_SIZE.to_string(),
                quality: DEFAULT_QUALITY.to_string(),
            },
            rate_limit_max: 3,
            rate_limit_window_secs: 24 * 60 * 60,
            require_integration_identity: false,
            response_mode: ResponseMode::Negotiate,
        }
    }
}
