// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model pricing tables and cost estimation.
//!
//! Pricing verified from <https://platform.openai.com/docs/pricing>
//! on 2026-07-01.
//!
//! gpt-4.1-nano: input=$0.10/MTok, output=$0.40/MTok
//! gpt-4.1-mini: input=$0.40/MTok, output=$1.60/MTok
//! gpt-4.1:      input=$2.00/MTok, output=$8.00/MTok
//! gpt-4o-mini:  input=$0.15/MTok, output=$0.60/MTok
//! gpt-4o:       input=$2.50/MTok, output=$10.00/MTok
//! o4-mini:      input=$1.10/MTok, output=$4.40/MTok
//! o3:           input=$2.00/MTok, output=$8.00/MTok
//! o1:           input=$15.00/MTok, output=$60.00/MTok

/// Per-model pricing in USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRates {
    /// Cost per million input tokens.
    pub input_per_mtok: f64,
    /// Cost per million output tokens.
    pub output_per_mtok: f64,
}

/// Output tokens assumed per response when estimating savings.
///
/// Savings are computed before the upstream answers, so the output side of
/// the cost is a fixed nominal allowance rather than a measurement.
pub const NOMINAL_OUTPUT_TOKENS: u64 = 500;

/// Known model prefixes, ordered most-specific-first so that
/// `gpt-4.1-nano` wins over `gpt-4.1` and `gpt-4o-mini` over `gpt-4o`.
/// Dated snapshots like `gpt-4.1-2025-04-14` match their family prefix.
const RATE_TABLE: &[(&str, ModelRates)] = &[
    (
        "gpt-4.1-nano",
        ModelRates {
            input_per_mtok: 0.10,
            output_per_mtok: 0.40,
        },
    ),
    (
        "gpt-4.1-mini",
        ModelRates {
            input_per_mtok: 0.40,
            output_per_mtok: 1.60,
        },
    ),
    (
        "gpt-4.1",
        ModelRates {
            input_per_mtok: 2.00,
            output_per_mtok: 8.00,
        },
    ),
    (
        "gpt-4o-mini",
        ModelRates {
            input_per_mtok: 0.15,
            output_per_mtok: 0.60,
        },
    ),
    (
        "gpt-4o",
        ModelRates {
            input_per_mtok: 2.50,
            output_per_mtok: 10.00,
        },
    ),
    (
        "o4-mini",
        ModelRates {
            input_per_mtok: 1.10,
            output_per_mtok: 4.40,
        },
    ),
    (
        "o3",
        ModelRates {
            input_per_mtok: 2.00,
            output_per_mtok: 8.00,
        },
    ),
    (
        "o1",
        ModelRates {
            input_per_mtok: 15.00,
            output_per_mtok: 60.00,
        },
    ),
];

/// Fallback rates for unknown models so savings estimation never fails.
const DEFAULT_RATES: ModelRates = ModelRates {
    input_per_mtok: 2.50,
    output_per_mtok: 10.00,
};

/// Look up rates for a given model identifier.
///
/// Matches case-insensitively on prefixes, most-specific-first. Unknown
/// models fall back to [`DEFAULT_RATES`].
pub fn rates_for(model: &str) -> ModelRates {
    let lower = model.to_lowercase();
    for (prefix, rates) in RATE_TABLE {
        if lower.starts_with(prefix) {
            return *rates;
        }
    }
    DEFAULT_RATES
}

/// Rough token count for a text: one token per four bytes, at least one.
pub fn estimate_tokens(text: &str) -> u64 {
    ((text.len() / 4) as u64).max(1)
}

/// Estimated cost in USD for a request against the given model.
pub fn estimate_cost(model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
    let rates = rates_for(model);
    (input_tokens as f64 / 1_000_000.0) * rates.input_per_mtok
        + (output_tokens as f64 / 1_000_000.0) * rates.output_per_mtok
}

/// Relative cost difference between the routed model and a baseline model
/// for the same token volume.
///
/// Returns a fraction of the baseline cost: `0.85` means the routed model
/// is estimated to cost 85% less. Negative values mean the routed model is
/// pricier; callers surface those as-is rather than clamping. Returns `0.0`
/// when the baseline cost is zero.
pub fn estimate_savings(
    routed_model: &str,
    baseline_model: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> f64 {
    let routed = estimate_cost(routed_model, input_tokens, output_tokens);
    let baseline = estimate_cost(baseline_model, input_tokens, output_tokens);

    if baseline == 0.0 {
        return 0.0;
    }
    1.0 - routed / baseline
}
