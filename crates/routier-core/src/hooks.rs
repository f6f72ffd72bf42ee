// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injectable lifecycle hooks for embedding the proxy.
//!
//! The proxy calls these at well-defined points: once when the listener is
//! serving, once per successful auto-route, and once per recovered request
//! failure. All callbacks are synchronous and have no return-value contract;
//! core behavior never depends on what an implementation does.

use serde::Serialize;

use crate::error::RoutierError;
use crate::types::Tier;

/// Summary of one auto-routed request, passed to [`RouterHooks::on_routed`].
#[derive(Debug, Clone, Serialize)]
pub struct RouteEvent {
    /// Model id the client declared (the sentinel spelling it used).
    pub original_model: String,
    /// Model id substituted into the forwarded body.
    pub routed_model: String,
    /// Classified difficulty tier.
    pub tier: Tier,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    /// Estimated fractional savings against the complex-tier baseline.
    /// Negative when the routed model costs more than the baseline.
    pub estimated_savings: f64,
    /// First 100 characters of the classified prompt.
    pub prompt_preview: String,
}

/// Observer callbacks invoked by the proxy.
///
/// `on_routed` runs on the request path; implementations must return
/// quickly and must not block.
pub trait RouterHooks: Send + Sync {
    /// The listener is bound and serving on `port`.
    fn on_ready(&self, port: u16) {
        let _ = port;
    }

    /// A request was classified and its model rewritten, about to forward.
    fn on_routed(&self, event: &RouteEvent) {
        let _ = event;
    }

    /// A per-request failure was converted into an error response.
    fn on_error(&self, error: &RoutierError) {
        let _ = error;
    }
}

/// Hook implementation that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl RouterHooks for NoopHooks {}
