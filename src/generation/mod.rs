// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card image generation: provider client and per-client quota

pub mod client;
pub mod errors;
pub mod rate_limiter;

pub use client::{
    GeneratedImage, ImageGenerationRequest, ImagePayload, ImageProvider, OpenAIImageClient,
};
pub use errors::GenerationError;
pub use rate_limiter::{
    CardRateLimiter, Clock, InMemoryQuotaStore, ManualClock, QuotaStore, RateLimitDecision,
    RateLimitEntry, SystemClock,
};
