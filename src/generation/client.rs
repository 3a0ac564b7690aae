// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image provider client for the OpenAI images API

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::errors::GenerationError;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-image-1";
/// Portrait output closest to the 2.5:3.5 card ratio
pub const DEFAULT_SIZE: &str = "1024x1536";
pub const DEFAULT_QUALITY: &str = "medium";

/// Generation takes ~50s on the provider side
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Something that turns a prompt into an image
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image for `prompt`; a single attempt, never retried
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError>;

    /// Model identifier sent to the provider
    fn model_name(&self) -> &str;
}

/// Image bytes as returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Base64-encoded PNG
    Base64Png(String),
    /// Hosted image URL
    Url(String),
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub payload: ImagePayload,
    /// Prompt the provider actually used, when it rewrote ours
    pub revised_prompt: Option<String>,
    pub model: String,
    pub processing_time_ms: u64,
}

/// Body of POST /v1/images/generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub n: u32,
}

// --- OpenAI response types ---

#[derive(Debug, Deserialize)]
pub struct OpenAIImageResponse {
    #[serde(default)]
    pub data: Option<Vec<OpenAIImageData>>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIImageData {
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub revised_prompt: Option<String>,
}

impl OpenAIImageResponse {
    /// Take the first image out of the response
    pub fn into_first_image(self) -> Result<(ImagePayload, Option<String>), GenerationError> {
        let first = self
            .data
            .and_then(|data| data.into_iter().next())
            .ok_or(GenerationError::EmptyResponse)?;

        let payload = match (first.b64_json, first.url) {
            (Some(b64), _) if !b64.is_empty() => ImagePayload::Base64Png(b64),
            (_, Some(url)) if !url.is_empty() => ImagePayload::Url(url),
            _ => return Err(GenerationError::MissingImageData),
        };
        Ok((payload, first.revised_prompt))
    }
}

/// Client for an OpenAI-compatible image generation endpoint
pub struct OpenAIImageClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    size: String,
    quality: String,
}

impl OpenAIImageClient {
    /// Create a client with the default size and quality
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Image provider configured: endpoint={}, model={}",
            endpoint, model
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model: model.to_string(),
            size: DEFAULT_SIZE.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
        })
    }

    pub fn with_size(mut self, size: &str) -> Self {
        self.size = size.to_string();
        self
    }

    pub fn with_quality(mut self, quality: &str) -> Self {
        self.quality = quality.to_string();
        self
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// Request body for `prompt` with this client's fixed settings
    pub fn build_request(&self, prompt: &str) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            size: self.size.clone(),
            quality: self.quality.clone(),
            n: 1,
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAIImageClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        let start = std::time::Instant::now();
        let body = self.build_request(prompt);

        let url = format!("{}/v1/images/generations", self.endpoint);
        debug!(
            "Image generate POST {} (prompt_len={}, size={}, quality={})",
            url,
            prompt.len(),
            self.size,
            self.quality
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_provider_response(
                status.as_u16(),
                &text,
            ));
        }

        let text = response.text().await?;
        let api_response: OpenAIImageResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::InvalidPayload(e.to_string()))?;
        let (payload, revised_prompt) = api_response.into_first_image()?;

        Ok(GeneratedImage {
            payload,
            revised_prompt,
            model: self.model.clone(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
