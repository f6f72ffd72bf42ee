// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.
//!
//! Runs after deserialization succeeds. `upstream.api_key` is deliberately
//! not checked here: offline classification works without a key, so its
//! presence is enforced by the proxy start path instead.

use routier_core::Tier;

use crate::diagnostic::ConfigError;
use crate::model::RoutierConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check every semantic constraint, collecting all failures rather than
/// stopping at the first.
pub fn validate_config(config: &RoutierConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.proxy.host.trim();
    if host.is_empty() {
        fail("proxy.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err() && !looks_like_hostname(host) {
        fail(format!(
            "proxy.host `{host}` is not a valid IP address or hostname"
        ));
    }

    if !LOG_LEVELS.contains(&config.proxy.log_level.as_str()) {
        fail(format!(
            "proxy.log_level must be one of trace, debug, info, warn, error; got `{}`",
            config.proxy.log_level
        ));
    }

    let base_url = config.upstream.base_url.trim();
    if base_url.is_empty() {
        fail("upstream.base_url must not be empty".to_string());
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        fail(format!(
            "upstream.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    for tier in Tier::ALL {
        if config.models.model_for(tier).trim().is_empty() {
            fail(format!("models.{tier} must not be empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn looks_like_hostname(host: &str) -> bool {
    host.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | ':'))
}
