// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card generation API endpoint module
//!
//! Provides POST /api/generate for card image generation.

pub mod client_identity;
pub mod handler;
pub mod response;

pub use client_identity::{client_identity, UNKNOWN_CLIENT};
pub use handler::{generate_card_get_handler, generate_card_handler};
pub use response::{wants_json, GenerateCardResponse};
