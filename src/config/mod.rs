// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod card_service;

pub use card_service::{CardServiceConfig, ProviderConfig, ResponseMode};
