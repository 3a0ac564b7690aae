// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Frame style prompt fragments

use super::params::FrameStyle;

/// Prompt fragments describing one frame style's layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStyleDefinition {
    pub base_prompt: &'static str,
    pub title_text_prompt: &'static str,
    pub additional_text_prompt: &'static str,
    pub both_texts_prompt: &'static str,
}

const NONE_FRAME: FrameStyleDefinition = FrameStyleDefinition {
    base_prompt: "Create a full-art card with no frame or border elements, allowing the artwork to fill the entire card.",
    title_text_prompt: "Overlay the title text directly on the artwork in a bold, readable font with a subtle shadow or glow effect.",
    additional_text_prompt: "Place additional text in a complementary position with similar styling to maintain readability.",
    both_texts_prompt: "Position the title prominently and the additional text as supporting information, both with effects for visibility.",
};

const POKEMON_FRAME: FrameStyleDefinition = FrameStyleDefinition {
    base_prompt: "Use a full-art Pokémon-style card layout. The top left contains a small stage label inside a blue capsule.",
    title_text_prompt: "Place the card name in bold white serif font on a dark red rectangular header at the top left. Top right displays HP in bold white next to a circular energy symbol.",
    additional_text_prompt: "Include attack descriptions in clean white sans-serif font over the artwork with semi-transparent boxes. Lower portion includes weakness, resistance, and retreat symbols.",
    both_texts_prompt: "Place the card name in bold white serif font on a dark red rectangular header at the top left. Top right displays HP next to a circular energy symbol. Use the additional text as attack names with energy icons. Include weakness, resistance, and retreat symbols at the bottom. Flavor text in a thin italicized box at the bottom right.",
};

const MAGIC_FRAME: FrameStyleDefinition = FrameStyleDefinition {
    base_prompt: "Use a full-art trading card frame inspired by Magic: The Gathering, with no visible borders.",
    title_text_prompt: "Place the card name at the top left in a bold serif font, enclosed in a curved 50% transparent banner. Align mana cost symbols to the top right.",
    additional_text_prompt: "Include a wide, rounded 50% transparent textbox in the lower third containing the text in a legible serif font. Show a power/toughness box in the bottom right corner.",
    both_texts_prompt: "Place the card name at the top left in a bold serif font in a curved 50% transparent banner. Mana cost symbols top right. Use the additional text as a type line and rules text in a 50% transparent textbox in the lower third. Power/toughness box in the bottom right corner.",
};

const CYBERPUNK_FRAME: FrameStyleDefinition = FrameStyleDefinition {
    base_prompt: "Use a full-art digital trading card frame with a high-tech cyber interface design. Thin angular circuit-like borders and corner connectors. Stylized HUD-style graphical elements in corners.",
    title_text_prompt: "Display the character name in bold all-caps digital styling integrated into the cyber interface.",
    additional_text_prompt: "Include subtitle text in matching digital font style, positioned to complement the interface design.",
    both_texts_prompt: "Display the title in bold all-caps text centered near the bottom within the digital interface. Place the additional text as a smaller subtitle below in matching font style. Integrate both with HUD-style elements and circuit patterns.",
};

impl FrameStyle {
    /// Static prompt fragments for this style
    pub fn definition(&self) -> &'static FrameStyleDefinition {
        match self {
            FrameStyle::None => &NONE_FRAME,
            FrameStyle::Pokemon => &POKEMON_FRAME,
            FrameStyle::Magic => &MAGIC_FRAME,
            FrameStyle::Cyberpunk => &CYBERPUNK_FRAME,
        }
    }

    /// Human readable label used in the card specifications block
    pub fn label(&self) -> &'static str {
        match self {
            FrameStyle::None => "Frameless Full Art",
            FrameStyle::Pokemon => "TCG Style",
            FrameStyle::Magic => "Fantasy Style",
            FrameStyle::Cyberpunk => "Cyberpunk Style",
        }
    }
}

impl FrameStyleDefinition {
    /// Pick the text layout fragment for the texts that are present
    pub fn text_layout(&self, has_title: bool, has_additional: bool) -> Option<&'static str> {
        match (has_title, has_additional) {
            (true, true) => Some(self.both_texts_prompt),
            (true, false) => Some(self.title_text_prompt),
            (false, true) => Some(self.additional_text_prompt),
            (false, false) => None,
        }
    }
}
