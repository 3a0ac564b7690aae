// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir Card Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-card-generation-2025-10-17";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-17";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "card-prompt-composition",
    "frame-styles",
    "per-client-quota",
    "accept-negotiation",
    "integration-identity",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir Card Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}
