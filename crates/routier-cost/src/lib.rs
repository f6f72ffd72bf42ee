// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing and savings estimation for the routier proxy.
//!
//! A static per-model rate table with prefix-based lookup, plus the savings
//! estimate the proxy logs when it routes a request to a cheaper model than
//! the baseline it compares against.

pub mod pricing;

pub use pricing::{
    estimate_cost, estimate_savings, estimate_tokens, rates_for, ModelRates,
    NOMINAL_OUTPUT_TOKENS,
};
