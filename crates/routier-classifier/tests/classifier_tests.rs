// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property and integration tests for the classification engine.

use proptest::prelude::*;
use routier_classifier::{
    score_prompt, weighted_sum, DecisionMethod, Dimension, WeightedClassifier,
};
use routier_core::Tier;

proptest! {
    /// Every dimension score stays in [0,1] for arbitrary input, including
    /// multi-script and control characters.
    #[test]
    fn scores_stay_in_unit_interval(prompt in "\\PC*") {
        let scores = score_prompt(&prompt);
        let mut seen = 0usize;
        for (dimension, score) in scores.iter() {
            prop_assert!(
                (0.0..=1.0).contains(&score),
                "{} out of range: {score}",
                dimension.key()
            );
            seen += 1;
        }
        prop_assert_eq!(seen, Dimension::COUNT);
    }

    /// The weighted sum inherits the unit interval from the scores because
    /// the weights are non-negative and sum to one.
    #[test]
    fn weighted_sum_stays_in_unit_interval(prompt in "\\PC*") {
        let scores = score_prompt(&prompt);
        let ws = weighted_sum(&scores);
        prop_assert!((0.0..=1.0).contains(&ws), "weighted sum out of range: {ws}");
    }

    /// Classification is total: any string yields a decision with a
    /// resolvable model and confidence in [0,1].
    #[test]
    fn classification_is_total(prompt in "\\PC*") {
        let decision = WeightedClassifier::default().classify(&prompt);
        prop_assert!(!decision.model.is_empty());
        prop_assert!((0.0..=1.0).contains(&decision.confidence));
        match decision.method {
            DecisionMethod::Rules => prop_assert!(decision.weighted_score.is_none()),
            DecisionMethod::Weighted => prop_assert!(decision.weighted_score.is_some()),
        }
    }
}

#[test]
fn long_prompt_without_signals_scores_point_nine_token_count() {
    let prompt = "lorem ".repeat(501);
    let scores = score_prompt(&prompt);
    assert!((scores.get(Dimension::TokenCount) - 0.9).abs() < 1e-12);
    // No rule dimension should have fired.
    for dimension in [
        Dimension::Code,
        Dimension::Technical,
        Dimension::Reasoning,
        Dimension::Math,
    ] {
        assert!((scores.get(dimension) - 0.0).abs() < f64::EPSILON);
    }
}

#[test]
fn two_reasoning_markers_always_override() {
    let classifier = WeightedClassifier::default();
    for prompt in [
        "Prove that sqrt(2) is irrational step by step",
        "Derive the formula and prove it correct",
        "Use chain of thought and reason through the riddle",
        "Докажи теорему шаг за шагом",
        "この定理を証明してください。一歩一歩考えてください",
        "이 정리를 단계별로 증명하세요",
        "أثبت أن الجذر التربيعي لاثنين غير نسبي خطوة بخطوة",
    ] {
        let decision = classifier.classify(prompt);
        assert_eq!(decision.tier, Tier::Reasoning, "prompt: {prompt}");
        assert!((decision.confidence - 0.97).abs() < f64::EPSILON);
        assert_eq!(decision.method, DecisionMethod::Rules);
    }
}

#[test]
fn canonical_simple_prompts_route_to_simple_tier() {
    let classifier = WeightedClassifier::default();
    for prompt in [
        "What is 2+2?",
        "Translate hello to Spanish",
        "thanks",
        "こんにちは",
        "안녕하세요",
        "مرحبا",
        "",
    ] {
        let decision = classifier.classify(prompt);
        assert_eq!(decision.tier, Tier::Simple, "prompt: {prompt}");
    }
}

#[test]
fn scores_snapshot_rides_along_with_every_decision() {
    let decision = WeightedClassifier::default().classify("compare these two options");
    let json = serde_json::to_value(&decision).unwrap();
    let scores = json["scores"].as_object().unwrap();
    assert_eq!(scores.len(), 14);
    assert!(scores["analysis"].as_f64().unwrap() > 0.0);
}
