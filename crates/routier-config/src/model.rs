// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the routier proxy.
//!
//! Every section carries `#[serde(deny_unknown_fields)]` so a misspelled key
//! fails the load instead of being silently dropped.

use routier_core::Tier;
use serde::{Deserialize, Serialize};

/// Top-level routier configuration.
///
/// Every section is optional; an empty config file yields a proxy that
/// listens on loopback and routes to the stock OpenAI model lineup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutierConfig {
    /// Upstream chat-completion provider settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Local proxy listener settings.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Model identifier assigned to each difficulty tier.
    #[serde(default)]
    pub models: ModelsConfig,
}

/// Upstream provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API. Only the scheme and host are used;
    /// the request path is carried over from the incoming request.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upstream API key. `None` requires the `ROUTIER_UPSTREAM_API_KEY`
    /// environment variable before the proxy will start.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

/// Local proxy listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Interface to bind. Loopback by default; the proxy is not meant to
    /// be exposed to untrusted networks.
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Default tracing level: one of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8401
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-tier model assignments.
///
/// Each difficulty tier maps to exactly one upstream model identifier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Model used for trivially easy requests.
    #[serde(default = "default_simple_model")]
    pub simple: String,

    /// Model used for moderately difficult requests.
    #[serde(default = "default_medium_model")]
    pub medium: String,

    /// Model used for difficult requests.
    #[serde(default = "default_complex_model")]
    pub complex: String,

    /// Model used for requests that need explicit multi-step reasoning.
    #[serde(default = "default_reasoning_model")]
    pub reasoning: String,
}

impl ModelsConfig {
    /// Model identifier assigned to the given tier.
    pub fn model_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::Simple => &self.simple,
            Tier::Medium => &self.medium,
            Tier::Complex => &self.complex,
            Tier::Reasoning => &self.reasoning,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            simple: default_simple_model(),
            medium: default_medium_model(),
            complex: default_complex_model(),
            reasoning: default_reasoning_model(),
        }
    }
}

fn default_simple_model() -> String {
    "gpt-4.1-nano".to_string()
}

fn default_medium_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_complex_model() -> String {
    "gpt-4.1".to_string()
}

fn default_reasoning_model() -> String {
    "o3".to_string()
}
