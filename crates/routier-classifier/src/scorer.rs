// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt scoring across the fourteen dimensions.
//!
//! Pure and total: any string input yields a fully populated score map with
//! every value in [0,1]. No I/O, no caching, recomputed per request.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::patterns::{count_matches, rules_for, tokenize, Dimension};

/// A fully populated score map, one value in [0,1] per dimension.
///
/// Serializes as a map keyed by [`Dimension::key`] in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionScores([f64; Dimension::COUNT]);

impl DimensionScores {
    /// Score for a single dimension.
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0[dimension as usize]
    }

    fn set(&mut self, dimension: Dimension, value: f64) {
        self.0[dimension as usize] = value;
    }

    /// Iterate scores in canonical dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

impl Serialize for DimensionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Dimension::COUNT))?;
        for (dimension, score) in self.iter() {
            map.serialize_entry(dimension.key(), &score)?;
        }
        map.end()
    }
}

/// Score a prompt across all dimensions.
pub fn score_prompt(prompt: &str) -> DimensionScores {
    let lower = prompt.to_lowercase();
    let tokens = tokenize(&lower);
    score_lowered(&lower, &tokens)
}

/// Score an already-lowercased, already-tokenized prompt.
///
/// Split out so the classifier can reuse the same preprocessing for its
/// raw reasoning-rule count.
pub(crate) fn score_lowered(lower: &str, tokens: &[&str]) -> DimensionScores {
    let mut scores = DimensionScores::default();
    for dimension in Dimension::ALL {
        let value = match dimension {
            Dimension::TokenCount => token_count_score(lower),
            Dimension::QuestionComplexity => question_complexity_score(lower),
            _ => rule_score(dimension, lower, tokens),
        };
        scores.set(dimension, value);
    }
    scores
}

/// Fraction of a dimension's rules that match, capped at 1.0.
fn rule_score(dimension: Dimension, lower: &str, tokens: &[&str]) -> f64 {
    let rules = rules_for(dimension);
    if rules.is_empty() {
        return 0.0;
    }
    let matched = count_matches(rules, lower, tokens);
    (matched as f64 / rules.len() as f64).min(1.0)
}

/// Banded score over the whitespace-token count.
///
/// Short prompts sit at 0.2, very long ones at 0.9, with a linear ramp over
/// [50,500] in between. The ramp reaches 1.0 at exactly 500 tokens before
/// the >500 band drops to 0.9; the discontinuity is intentional and matched
/// by tests.
fn token_count_score(text: &str) -> f64 {
    let n = text.split_whitespace().count();
    if n < 50 {
        0.2
    } else if n > 500 {
        0.9
    } else {
        0.5 + (n as f64 - 50.0) / 900.0
    }
}

/// Question-mark count scaled so three or more questions saturate at 1.0.
fn question_complexity_score(text: &str) -> f64 {
    let q = text.matches('?').count();
    (q as f64 / 3.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_yields_minimal_scores() {
        let scores = score_prompt("");
        assert!((scores.get(Dimension::TokenCount) - 0.2).abs() < f64::EPSILON);
        assert!((scores.get(Dimension::QuestionComplexity) - 0.0).abs() < f64::EPSILON);
        for (_, score) in scores.iter() {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn token_count_bands() {
        let short = "word ".repeat(49);
        let at_fifty = "word ".repeat(50);
        let mid = "word ".repeat(275);
        let at_five_hundred = "word ".repeat(500);
        let over = "word ".repeat(501);

        let s = |t: &str| score_prompt(t).get(Dimension::TokenCount);
        assert!((s(&short) - 0.2).abs() < 1e-12);
        assert!((s(&at_fifty) - 0.5).abs() < 1e-12);
        assert!((s(&mid) - 0.75).abs() < 1e-12);
        assert!((s(&at_five_hundred) - 1.0).abs() < 1e-12);
        assert!((s(&over) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn question_complexity_saturates_at_three() {
        let s = |t: &str| score_prompt(t).get(Dimension::QuestionComplexity);
        assert!((s("no questions") - 0.0).abs() < f64::EPSILON);
        assert!((s("why?") - 1.0 / 3.0).abs() < 1e-12);
        assert!((s("a? b? c?") - 1.0).abs() < f64::EPSILON);
        assert!((s("a? b? c? d? e?") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rule_score_is_match_fraction() {
        // Two of six analysis rules.
        let scores = score_prompt("analyze and compare these options");
        let expected = 2.0 / 6.0;
        assert!((scores.get(Dimension::Analysis) - expected).abs() < 1e-12);
    }

    #[test]
    fn code_fence_counts_toward_code() {
        let scores = score_prompt("what does this do\n```\nfn main() {}\n```");
        assert!(scores.get(Dimension::Code) > 0.0);
    }

    #[test]
    fn serializes_exactly_fourteen_keys() {
        let scores = score_prompt("hello");
        let value = serde_json::to_value(scores).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), Dimension::COUNT);
        for dimension in Dimension::ALL {
            assert!(
                map.contains_key(dimension.key()),
                "missing key {}",
                dimension.key()
            );
        }
    }

    #[test]
    fn scores_are_independent_of_case() {
        let a = score_prompt("PROVE THE THEOREM");
        let b = score_prompt("prove the theorem");
        assert_eq!(a, b);
    }

    #[test]
    fn multiscript_prompt_scores_reasoning() {
        let scores = score_prompt("Докажи теорему шаг за шагом");
        // Two of eighteen reasoning rules match.
        assert!((scores.get(Dimension::Reasoning) - 2.0 / 18.0).abs() < 1e-12);
    }
}
