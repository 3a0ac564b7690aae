// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::generate_card::{generate_card_get_handler, generate_card_handler};
use crate::cards::CardValidator;
use crate::config::{CardServiceConfig, ResponseMode};
use crate::generation::{CardRateLimiter, ImageProvider, OpenAIImageClient};

/// Shared state for all request handlers
pub struct AppState {
    /// `None` when no provider credential is configured
    pub image_provider: Option<Arc<dyn ImageProvider>>,
    pub rate_limiter: Arc<CardRateLimiter>,
    pub validator: CardValidator,
    pub response_mode: ResponseMode,
}

impl AppState {
    /// Build state from service configuration
    pub fn from_config(config: &CardServiceConfig) -> Result<Self> {
        let image_provider: Option<Arc<dyn ImageProvider>> = match &config.provider.api_key {
            Some(api_key) => {
                let client = OpenAIImageClient::new(
                    &config.provider.endpoint,
                    api_key,
                    &config.provider.model,
                )?
                .with_size(&config.provider.size)
                .with_quality(&config.provider.quality);
                Some(Arc::new(client))
            }
            None => {
                warn!("OPENAI_API_KEY not set - card generation will return 503");
                None
            }
        };

        Ok(Self {
            image_provider,
            rate_limiter: Arc::new(CardRateLimiter::with_window(
                config.rate_limit_max,
                config.rate_limit_window(),
            )),
            validator: CardValidator::new(config.require_integration_identity),
            response_mode: config.response_mode,
        })
    }

    /// State with no provider and the default quota
    pub fn new_for_test() -> Self {
        let defaults = CardServiceConfig::default();
        Self {
            image_provider: None,
            rate_limiter: Arc::new(CardRateLimiter::new(defaults.rate_limit_max)),
            validator: CardValidator::default(),
            response_mode: defaults.response_mode,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.image_provider = Some(provider);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<CardRateLimiter>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn with_validator(mut self, validator: CardValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_response_mode(mut self, response_mode: ResponseMode) -> Self {
        self.response_mode = response_mode;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub rate_limit: RateLimitInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub max_per_window: u32,
    pub window_secs: u64,
    pub tracked_clients: usize,
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/generate",
            post(generate_card_handler).get(generate_card_get_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION.to_string(),
        provider_configured: state.image_provider.is_some(),
        model: state
            .image_provider
            .as_ref()
            .map(|p| p.model_name().to_string()),
        rate_limit: RateLimitInfo {
            max_per_window: state.rate_limiter.max_per_window(),
            window_secs: state.rate_limiter.window().as_secs(),
            tracked_clients: state.rate_limiter.tracked_clients(),
        },
    })
}

/// Bind and serve until Ctrl+C
pub async fn start_server(config: &CardServiceConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = create_app(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Card API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
