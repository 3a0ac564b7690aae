// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cards;
pub mod config;
pub mod generation;
pub mod version;

pub use api::{create_app, AppState};
pub use cards::{build_card_prompt, CardParams, CardSpec, CardValidator, FrameStyle};
pub use config::CardServiceConfig;
pub use generation::{CardRateLimiter, ImageProvider, OpenAIImageClient};
