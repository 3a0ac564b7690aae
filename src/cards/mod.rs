// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card description handling: parameters, validation and prompt composition

pub mod frames;
pub mod params;
pub mod prompt_builder;
pub mod validation;

pub use frames::FrameStyleDefinition;
pub use params::{CardParams, CardSpec, FrameStyle};
pub use prompt_builder::build_card_prompt;
pub use validation::{CardValidator, ValidationError};
