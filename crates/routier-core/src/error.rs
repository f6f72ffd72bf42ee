// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the routier proxy.

use thiserror::Error;

/// The primary error type used across routier crates.
///
/// Startup errors (`Config`, `PortConflict`) are fatal and surface to the
/// caller of the start operation. Per-request errors (`RequestParse`,
/// `Upstream`, `Internal`) are recovered into JSON error responses and never
/// affect other in-flight connections.
#[derive(Debug, Error)]
pub enum RoutierError {
    /// Configuration errors (missing API key, unusable base URL, empty tier
    /// model ids). Fatal before the listener binds.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configured port is held by a process that did not answer the
    /// health probe as a compatible routier instance. Fatal to startup.
    #[error("port {port} is already in use and the occupant is not a healthy routier instance")]
    PortConflict { port: u16 },

    /// A request declared the auto sentinel but its body was unusable for
    /// classification. Recovered per request as a 500 JSON body.
    #[error("request parse error: {message}")]
    RequestParse { message: String },

    /// Network failure reaching the upstream endpoint (refused, reset,
    /// timeout). Recovered per request as a 502 JSON body.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
