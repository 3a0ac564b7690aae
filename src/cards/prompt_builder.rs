// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card prompt composition
//!
//! Builds the image-generation prompt for a validated card. The output is a
//! pure function of the input.
//!
//! Two notions of "present" are used for the text fields:
//! - layout selection (`Text layout:` fragment) ignores whitespace-only text
//! - the generic overlay line and the specification bullets count any
//!   non-empty string, including whitespace-only

use std::fmt::Write;

use super::params::CardSpec;

pub const PREAMBLE: &str = "Create a fully designed, high-resolution trading card image in portrait orientation with an aspect ratio of 2.5:3.5 (standard playing card dimensions).";

pub const BREAKOUT_EFFECT: &str = "Special effect: The character should visually break through the frame, with parts of their body extending past the border to give a 3D effect.";

pub const TEXT_OVERLAY: &str = "Text overlay: Place text directly on the artwork with shadow/glow effects for readability. Title prominent, additional text as supporting info.";

pub const SPECIFICATIONS_HEADER: &str = "Card specifications:";

pub const CLOSING: &str = "The final composition should resemble a premium trading card: perfectly centered, clear layout, crisp detail, and layered effects with a dynamic visual style.\nIMPORTANT: Generate in 2.5:3.5 portrait orientation suitable for printing on a physical card.";

/// Compose the provider prompt for a card
pub fn build_card_prompt(card: &CardSpec) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    let title = card.title_text.as_deref();
    let additional = card.additional_text.as_deref();

    match card.frame_style {
        Some(style) => {
            let frame = style.definition();
            let _ = write!(prompt, "Frame: {}\n\n", frame.base_prompt);

            if let Some(layout) = frame.text_layout(has_trimmed(title), has_trimmed(additional)) {
                let _ = write!(prompt, "Text layout: {}\n\n", layout);
            }

            if style.has_border() {
                prompt.push_str(BREAKOUT_EFFECT);
                prompt.push_str("\n\n");
            }
        }
        None => {
            if has_untrimmed(title) || has_untrimmed(additional) {
                prompt.push_str(TEXT_OVERLAY);
                prompt.push_str("\n\n");
            }
        }
    }

    prompt.push_str(SPECIFICATIONS_HEADER);
    prompt.push('\n');
    if !card.main_character.is_empty() {
        let _ = writeln!(prompt, "• Main character: {}", card.main_character);
    }
    if let Some(background) = card.background.as_deref().filter(|b| !b.is_empty()) {
        let _ = writeln!(prompt, "• Background: {}", background);
    }
    if let Some(style) = card.frame_style {
        let _ = writeln!(prompt, "• Card frame: {}", style.label());
    }
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let _ = writeln!(prompt, "• Title: \"{}\"", title);
    }
    if let Some(additional) = additional.filter(|a| !a.is_empty()) {
        let _ = writeln!(prompt, "• Additional text: \"{}\"", additional);
    }

    prompt.push('\n');
    prompt.push_str(CLOSING);
    prompt
}

fn has_trimmed(text: Option<&str>) -> bool {
    text.map_or(false, |t| !t.trim().is_empty())
}

fn has_untrimmed(text: Option<&str>) -> bool {
    text.map_or(false, |t| !t.is_empty())
}
