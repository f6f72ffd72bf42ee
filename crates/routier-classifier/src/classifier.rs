// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted tier classification.
//!
//! Combines dimension scores through a fixed weight table into one of four
//! tiers, with a rule-count override for prompts carrying two or more
//! explicit reasoning markers.

use routier_config::model::ModelsConfig;
use routier_core::Tier;
use serde::Serialize;
use strum::Display;

use crate::patterns::{count_matches, rules_for, tokenize, Dimension};
use crate::scorer::{score_lowered, DimensionScores};

/// Fixed dimension weights. Must sum to 1.0; checked by tests.
pub const WEIGHT_TABLE: [(Dimension, f64); Dimension::COUNT] = [
    (Dimension::TokenCount, 0.08),
    (Dimension::QuestionComplexity, 0.05),
    (Dimension::Code, 0.13),
    (Dimension::Technical, 0.11),
    (Dimension::Reasoning, 0.16),
    (Dimension::Math, 0.10),
    (Dimension::MultiStep, 0.09),
    (Dimension::Analysis, 0.08),
    (Dimension::Creative, 0.04),
    (Dimension::Constraint, 0.05),
    (Dimension::Imperative, 0.06),
    (Dimension::Format, 0.02),
    (Dimension::Simple, 0.01),
    (Dimension::Negation, 0.02),
];

/// Confidence reported when the reasoning override fires.
const REASONING_OVERRIDE_CONFIDENCE: f64 = 0.97;

/// How a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DecisionMethod {
    /// Reasoning-rule override: two or more raw markers matched.
    Rules,
    /// Weighted-sum thresholds.
    Weighted,
}

/// The outcome of classifying one prompt.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    /// Selected difficulty tier.
    pub tier: Tier,
    /// Model identifier resolved from the tier map.
    pub model: String,
    /// Certainty of the decision in [0,1].
    pub confidence: f64,
    /// The weighted sum, present only for the weighted method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    /// Which path produced the decision.
    pub method: DecisionMethod,
    /// Full score snapshot for observability.
    pub scores: DimensionScores,
}

/// Classifies prompts into tiers using the fixed weight table.
///
/// Holds only the immutable tier-to-model map; safe to share across
/// connections.
#[derive(Debug, Clone)]
pub struct WeightedClassifier {
    models: ModelsConfig,
}

impl WeightedClassifier {
    /// Create a classifier over the given tier-to-model map.
    pub fn new(models: ModelsConfig) -> Self {
        Self { models }
    }

    /// Tier-to-model map this classifier routes into.
    pub fn models(&self) -> &ModelsConfig {
        &self.models
    }

    /// Classify a prompt. Total: never fails on any string input.
    ///
    /// Precedence:
    /// 1. Two or more raw reasoning-rule matches force the reasoning tier
    ///    at fixed confidence, bypassing the weighted path entirely.
    /// 2. Otherwise tiers are selected from the weighted sum, with strong
    ///    code/imperative signals blocking the low-score tiers.
    pub fn classify(&self, prompt: &str) -> RoutingDecision {
        let lower = prompt.to_lowercase();
        let tokens = tokenize(&lower);
        let scores = score_lowered(&lower, &tokens);
        let reasoning_matches =
            count_matches(rules_for(Dimension::Reasoning), &lower, &tokens);

        if reasoning_matches >= 2 {
            return RoutingDecision {
                tier: Tier::Reasoning,
                model: self.models.model_for(Tier::Reasoning).to_string(),
                confidence: REASONING_OVERRIDE_CONFIDENCE,
                weighted_score: None,
                method: DecisionMethod::Rules,
                scores,
            };
        }

        let weighted = weighted_sum(&scores);
        let confidence = logistic_confidence(weighted);

        let strong_code =
            scores.get(Dimension::Code) > 0.3 || scores.get(Dimension::Technical) > 0.3;
        let strong_imperative = scores.get(Dimension::Imperative) > 0.3
            && (scores.get(Dimension::Code) > 0.1 || scores.get(Dimension::Technical) > 0.1);

        let tier = if weighted < 0.20 && !strong_code && !strong_imperative {
            Tier::Simple
        } else if scores.get(Dimension::Reasoning) > 0.5 || reasoning_matches >= 1 {
            Tier::Reasoning
        } else if weighted < 0.40 && !strong_imperative {
            Tier::Medium
        } else {
            Tier::Complex
        };

        RoutingDecision {
            tier,
            model: self.models.model_for(tier).to_string(),
            confidence,
            weighted_score: Some(weighted),
            method: DecisionMethod::Weighted,
            scores,
        }
    }
}

impl Default for WeightedClassifier {
    fn default() -> Self {
        Self::new(ModelsConfig::default())
    }
}

/// Dot product of scores and the weight table.
pub fn weighted_sum(scores: &DimensionScores) -> f64 {
    WEIGHT_TABLE
        .iter()
        .map(|(dimension, weight)| scores.get(*dimension) * weight)
        .sum()
}

/// Logistic calibration centered at 0.5 with steepness 10.
fn logistic_confidence(weighted: f64) -> f64 {
    1.0 / (1.0 + (-10.0 * (weighted - 0.5)).exp())
}
