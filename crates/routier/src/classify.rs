// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `routier classify` command implementation.
//!
//! Classifies a prompt with the configured tier model map and prints the
//! decision as JSON, without binding a port or contacting any upstream.

use routier_classifier::WeightedClassifier;
use routier_config::RoutierConfig;
use routier_core::error::RoutierError;

/// Runs the `routier classify` command.
pub fn run_classify(config: &RoutierConfig, prompt: &str) -> Result<(), RoutierError> {
    println!("{}", classification_json(config, prompt)?);
    Ok(())
}

fn classification_json(config: &RoutierConfig, prompt: &str) -> Result<String, RoutierError> {
    let classifier = WeightedClassifier::new(config.models.clone());
    let decision = classifier.classify(prompt);
    serde_json::to_string_pretty(&decision)
        .map_err(|e| RoutierError::Internal(format!("failed to serialize decision: {e}")))
}
