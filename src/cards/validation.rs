// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card parameter validation
//!
//! Rules are checked in a fixed order and the first failure is returned.

use thiserror::Error;

use super::params::{CardParams, CardSpec, FrameStyle};

pub const MAX_MAIN_CHARACTER_CHARS: usize = 300;
pub const MAX_BACKGROUND_CHARS: usize = 300;
pub const MAX_TITLE_TEXT_CHARS: usize = 100;
pub const MAX_ADDITIONAL_TEXT_CHARS: usize = 200;

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Request field that failed
    pub field: &'static str,
    /// Client-facing message
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates incoming card parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct CardValidator {
    /// Require `platform` and `external_user_id` (integration deployments)
    pub require_integration_identity: bool,
}

impl CardValidator {
    pub fn new(require_integration_identity: bool) -> Self {
        Self {
            require_integration_identity,
        }
    }

    /// Check `params` and return the typed card spec on success
    pub fn validate(&self, params: &CardParams) -> Result<CardSpec, ValidationError> {
        if self.require_integration_identity {
            if is_blank(params.platform.as_deref()) {
                return Err(ValidationError::new("platform", "platform is required"));
            }
            if is_blank(params.external_user_id.as_deref()) {
                return Err(ValidationError::new(
                    "external_user_id",
                    "external_user_id is required",
                ));
            }
        }

        if params.main_character.trim().is_empty() {
            return Err(ValidationError::new(
                "mainCharacter",
                "mainCharacter is required",
            ));
        }
        check_length(
            "mainCharacter",
            Some(&params.main_character),
            MAX_MAIN_CHARACTER_CHARS,
        )?;
        check_length(
            "background",
            params.background.as_deref(),
            MAX_BACKGROUND_CHARS,
        )?;
        check_length(
            "titleText",
            params.title_text.as_deref(),
            MAX_TITLE_TEXT_CHARS,
        )?;
        check_length(
            "additionalText",
            params.additional_text.as_deref(),
            MAX_ADDITIONAL_TEXT_CHARS,
        )?;

        // An empty frameStyle string is the same as leaving it out
        let frame_style = match params.frame_style.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<FrameStyle>()
                    .map_err(|_| ValidationError::new("frameStyle", "Invalid frameStyle"))?,
            ),
        };

        Ok(CardSpec {
            main_character: params.main_character.clone(),
            background: params.background.clone(),
            frame_style,
            title_text: params.title_text.clone(),
            additional_text: params.additional_text.clone(),
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn check_length(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max_chars => Err(ValidationError::new(
            field,
            format!("{} must be under {} characters", field, max_chars),
        )),
        _ => Ok(()),
    }
}
