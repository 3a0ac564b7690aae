// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for API tests: a scripted image provider and request builders

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use fabstir_card_node::{
    api::{create_app, AppState},
    generation::{GeneratedImage, GenerationError, ImagePayload, ImageProvider},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// "hello" in base64
pub const PNG_B64: &str = "aGVsbG8=";

pub enum MockBehavior {
    Inline(&'static str),
    Url(&'static str),
    Fail(fn() -> GenerationError),
}

pub struct MockProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn inline() -> Arc<Self> {
        Self::new(MockBehavior::Inline(PNG_B64))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        let payload = match &self.behavior {
            MockBehavior::Inline(b64) => ImagePayload::Base64Png(b64.to_string()),
            MockBehavior::Url(url) => ImagePayload::Url(url.to_string()),
            MockBehavior::Fail(make_err) => return Err(make_err()),
        };
        Ok(GeneratedImage {
            payload,
            revised_prompt: Some("a revised card prompt".to_string()),
            model: "mock-image-model".to_string(),
            processing_time_ms: 1,
        })
    }

    fn model_name(&self) -> &str {
        "mock-image-model"
    }
}

pub fn app_with(state: AppState) -> Router {
    create_app(Arc::new(state))
}

pub fn post_card(body: &str, client: Option<&str>, accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/generate")
        .header("content-type", "application/json");
    if let Some(client) = client {
        builder = builder.header("x-forwarded-for", client);
    }
    if let Some(accept) = accept {
        builder = builder.header("accept", accept);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub const VALID_CARD: &str = r#"{
    "mainCharacter": "a frost-covered samurai with glowing blue eyes",
    "background": "a frozen battlefield under a pale moon",
    "frameStyle": "magic",
    "titleText": "Frost Blade",
    "additionalText": "Creature - Warrior"
}"#;
