// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card request parameters and the frame style enum

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw card description as received on POST /api/generate
///
/// Fields are kept loosely typed so the validator can report the first
/// failing rule in a fixed order instead of a serde error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParams {
    /// Primary subject of the card artwork
    #[serde(default)]
    pub main_character: String,

    /// Scene behind the character
    #[serde(default)]
    pub background: Option<String>,

    /// One of "none", "pokemon", "magic", "cyberpunk"
    #[serde(default)]
    pub frame_style: Option<String>,

    /// Card title (rendered as the card name)
    #[serde(default)]
    pub title_text: Option<String>,

    /// Secondary text (type line, attack names, subtitle)
    #[serde(default)]
    pub additional_text: Option<String>,

    /// Calling integration, required when integration identity is enforced
    #[serde(default)]
    pub platform: Option<String>,

    /// End user id within the calling integration
    #[serde(default, rename = "external_user_id", alias = "externalUserId")]
    pub external_user_id: Option<String>,
}

/// Visual template controlling which prompt fragments describe the card layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    None,
    Pokemon,
    Magic,
    Cyberpunk,
}

impl FrameStyle {
    pub const ALL: [FrameStyle; 4] = [
        FrameStyle::None,
        FrameStyle::Pokemon,
        FrameStyle::Magic,
        FrameStyle::Cyberpunk,
    ];

    /// Wire value of this style
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStyle::None => "none",
            FrameStyle::Pokemon => "pokemon",
            FrameStyle::Magic => "magic",
            FrameStyle::Cyberpunk => "cyberpunk",
        }
    }

    /// Frameless cards never get the border breakout effect
    pub fn has_border(&self) -> bool {
        !matches!(self, FrameStyle::None)
    }
}

impl FromStr for FrameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown frame style '{}'", s))
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card description that passed validation
///
/// Text fields are carried exactly as received; presence rules are applied
/// by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    pub main_character: String,
    pub background: Option<String>,
    pub frame_style: Option<FrameStyle>,
    pub title_text: Option<String>,
    pub additional_text: Option<String>,
}

impl CardSpec {
    /// Spec with only a main character, handy for building up in tests
    pub fn new(main_character: impl Into<String>) -> Self {
        Self {
            main_character: main_character.into(),
            background: None,
            frame_style: None,
            title_text: None,
            additional_text: None,
        }
    }
}
