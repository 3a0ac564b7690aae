// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use fabstir_card_node::{api::start_server, config::CardServiceConfig, version};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", version::get_version_string());

    let config = CardServiceConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    tracing::info!(
        "Quota: {} generations per {}s per client, provider configured: {}",
        config.rate_limit_max,
        config.rate_limit_window_secs,
        config.has_provider_credentials()
    );

    start_server(&config).await
}
