// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client identity used as the quota key

use axum::http::HeaderMap;

/// Shared bucket for callers without a forwarded address
pub const UNKNOWN_CLIENT: &str = "unknown";

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// First address in `x-forwarded-for`, or [`UNKNOWN_CLIENT`]
pub fn client_identity(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
