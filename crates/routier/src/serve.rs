// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `routier serve` command implementation.
//!
//! Starts the routing proxy with the loaded configuration and blocks until
//! SIGINT or SIGTERM, then releases the listener gracefully. When a healthy
//! routier instance already occupies the configured port, that instance is
//! left serving and this invocation exits successfully.

use std::sync::Arc;

use tracing::info;

use routier_config::RoutierConfig;
use routier_core::error::RoutierError;
use routier_core::hooks::NoopHooks;
use routier_proxy::start_proxy;

use crate::shutdown;

/// Runs the `routier serve` command.
pub async fn run_serve(config: RoutierConfig) -> Result<(), RoutierError> {
    init_tracing(&config.proxy.log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting routier serve");
    info!(
        simple = config.models.simple.as_str(),
        medium = config.models.medium.as_str(),
        complex = config.models.complex.as_str(),
        reasoning = config.models.reasoning.as_str(),
        "tier model map loaded"
    );
    info!(
        upstream = config.upstream.base_url.as_str(),
        "forwarding to upstream"
    );

    // Install signal handler before binding so a signal during startup is
    // not lost.
    let cancel = shutdown::install_signal_handler();
    let handle = start_proxy(&config, Arc::new(NoopHooks)).await?;

    if handle.is_adopted() {
        info!(
            port = handle.port(),
            "a routier instance already serves this port, leaving it running"
        );
        return Ok(());
    }

    cancel.cancelled().await;
    handle.shutdown().await;
    info!("routier serve shutdown complete");
    Ok(())
}

/// Subscriber setup. `RUST_LOG` wins when set; otherwise the configured
/// level applies to every `routier` crate and warn elsewhere.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("routier={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
