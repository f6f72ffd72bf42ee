// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic difficulty classification for the routier proxy.
//!
//! Classifies prompts into Simple/Medium/Complex/Reasoning tiers using
//! fourteen weighted signal dimensions. No model pre-call, no network,
//! no latency: scoring is pure string inspection on the hot path.

pub mod classifier;
pub mod patterns;
pub mod scorer;

pub use classifier::{
    weighted_sum, DecisionMethod, RoutingDecision, WeightedClassifier, WEIGHT_TABLE,
};
pub use patterns::{rules_for, Dimension, Matcher, Rule};
pub use scorer::{score_prompt, DimensionScores};
