// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the routier workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Task-difficulty tier, ordered by expected downstream model cost.
///
/// The four tiers map one-to-one onto the tier model map loaded at startup;
/// every classification resolves to exactly one of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Trivial lookups, greetings, one-line translations.
    Simple,
    /// General conversation and moderate Q&A.
    Medium,
    /// Code generation, technical work, multi-part tasks.
    Complex,
    /// Proofs, derivations, explicit step-by-step reasoning.
    Reasoning,
}

impl Tier {
    /// All tiers in ascending cost order.
    pub const ALL: [Tier; 4] = [Tier::Simple, Tier::Medium, Tier::Complex, Tier::Reasoning];
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn tier_display_round_trips() {
        for tier in Tier::ALL {
            let s = tier.to_string();
            let parsed = Tier::from_str(&s).expect("should parse back");
            assert_eq!(tier, parsed);
        }
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Simple).unwrap(), "\"simple\"");
        assert_eq!(
            serde_json::to_string(&Tier::Reasoning).unwrap(),
            "\"reasoning\""
        );
    }

    #[test]
    fn tier_all_has_four_variants() {
        assert_eq!(Tier::ALL.len(), 4);
    }
}
