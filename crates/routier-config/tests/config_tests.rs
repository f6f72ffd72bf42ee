// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the routier configuration system.

use routier_config::diagnostic::{nearest_key, ConfigError};
use routier_config::model::RoutierConfig;
use routier_config::{load_and_validate_str, load_config_from_path, load_config_from_str};
use routier_core::Tier;

#[test]
fn full_toml_deserializes_every_section() {
    let toml = r#"
[upstream]
base_url = "http://localhost:4000"
api_key = "sk-test-123"

[proxy]
host = "0.0.0.0"
port = 9000
log_level = "debug"

[models]
simple = "gpt-4o-mini"
medium = "gpt-4o"
complex = "gpt-4.1"
reasoning = "o1"
"#;

    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.upstream.base_url, "http://localhost:4000");
    assert_eq!(config.upstream.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.proxy.host, "0.0.0.0");
    assert_eq!(config.proxy.port, 9000);
    assert_eq!(config.proxy.log_level, "debug");
    assert_eq!(config.models.simple, "gpt-4o-mini");
    assert_eq!(config.models.medium, "gpt-4o");
    assert_eq!(config.models.complex, "gpt-4.1");
    assert_eq!(config.models.reasoning, "o1");
}

#[test]
fn empty_toml_falls_back_to_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.upstream.base_url, "https://api.openai.com");
    assert!(config.upstream.api_key.is_none());
    assert_eq!(config.proxy.host, "127.0.0.1");
    assert_eq!(config.proxy.port, 8401);
    assert_eq!(config.proxy.log_level, "info");
    assert_eq!(config.models.simple, "gpt-4.1-nano");
    assert_eq!(config.models.medium, "gpt-4.1-mini");
    assert_eq!(config.models.complex, "gpt-4.1");
    assert_eq!(config.models.reasoning, "o3");
}

#[test]
fn misspelled_key_in_a_section_is_rejected() {
    let err = load_config_from_str("[proxy]\nhosst = \"127.0.0.1\"\n").unwrap_err();
    let rendered = err.to_string();
    assert!(
        rendered.contains("unknown field") || rendered.contains("hosst"),
        "expected the unknown key to surface, got: {rendered}"
    );
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let err = load_config_from_str("[routing]\nstrategy = \"auto\"\n").unwrap_err();
    let rendered = err.to_string();
    assert!(
        rendered.contains("unknown field") || rendered.contains("routing"),
        "expected the unknown section to surface, got: {rendered}"
    );
}

/// A higher layer wins over a TOML file, the way `ROUTIER_PROXY_PORT` wins
/// over `routier.toml` in the real hierarchy.
#[test]
fn later_layer_overrides_toml_value() {
    use figment::providers::{Format, Serialized, Toml};
    use figment::Figment;

    let config: RoutierConfig = Figment::new()
        .merge(Serialized::defaults(RoutierConfig::default()))
        .merge(Toml::string("[proxy]\nport = 8401\n"))
        .merge(("proxy.port", 9999))
        .extract()
        .unwrap();
    assert_eq!(config.proxy.port, 9999);
}

/// The env mapping targets `upstream.api_key` as a single dotted key, never
/// `upstream.api.key`.
#[test]
fn dotted_api_key_path_reaches_the_option() {
    use figment::providers::Serialized;
    use figment::Figment;

    let config: RoutierConfig = Figment::new()
        .merge(Serialized::defaults(RoutierConfig::default()))
        .merge(("upstream.api_key", "sk-from-env"))
        .extract()
        .unwrap();
    assert_eq!(config.upstream.api_key.as_deref(), Some("sk-from-env"));
}

#[test]
fn nonexistent_file_in_the_hierarchy_is_ignored() {
    use figment::providers::{Format, Serialized, Toml};
    use figment::Figment;

    let config: RoutierConfig = Figment::new()
        .merge(Serialized::defaults(RoutierConfig::default()))
        .merge(Toml::file("/nonexistent/path/routier.toml"))
        .extract()
        .unwrap();
    assert_eq!(config.proxy.port, 8401);
}

#[test]
fn explicit_path_layers_over_defaults() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[proxy]\nport = 4242\n\n[models]\nsimple = \"tiny-model\"\n"
    )
    .unwrap();

    let config = load_config_from_path(file.path()).unwrap();
    assert_eq!(config.proxy.port, 4242);
    assert_eq!(config.models.simple, "tiny-model");
    assert_eq!(config.upstream.base_url, "https://api.openai.com");
}

#[test]
fn every_tier_resolves_to_its_configured_model() {
    let config = RoutierConfig::default();
    assert_eq!(config.models.model_for(Tier::Simple), "gpt-4.1-nano");
    assert_eq!(config.models.model_for(Tier::Medium), "gpt-4.1-mini");
    assert_eq!(config.models.model_for(Tier::Complex), "gpt-4.1");
    assert_eq!(config.models.model_for(Tier::Reasoning), "o3");
}

#[test]
fn typo_against_upstream_keys_suggests_api_key() {
    assert_eq!(
        nearest_key("api_kye", &["base_url", "api_key"]),
        Some("api_key".to_string())
    );
}

#[test]
fn distant_typo_gets_no_suggestion() {
    assert_eq!(nearest_key("zzzzzz", &["base_url", "api_key"]), None);
}

#[test]
fn diagnostics_name_the_bad_key_and_its_correction() {
    let errors = load_and_validate_str("[upstream]\napi_kye = \"sk-test\"\n").unwrap_err();
    assert!(!errors.is_empty());

    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. }
            if key == "api_kye"
                && suggestion.as_deref() == Some("api_key")
                && valid_keys.contains("base_url"))
    });
    assert!(found, "expected UnknownKey with a correction, got: {errors:?}");
}

#[test]
fn diagnostics_list_the_section_schema() {
    let errors = load_and_validate_str("[models]\nreasonning = \"o3\"\n").unwrap_err();
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { valid_keys, .. }
            if ["simple", "medium", "complex", "reasoning"]
                .iter()
                .all(|k| valid_keys.contains(k)))
    });
    assert!(found, "expected the [models] schema in the diagnostic");
}

#[test]
fn wrong_value_type_surfaces_the_key() {
    let err = load_config_from_str("[proxy]\nport = \"not_a_number\"\n").unwrap_err();
    let rendered = err.to_string();
    assert!(
        rendered.contains("invalid type") || rendered.contains("port"),
        "expected a type mismatch mention, got: {rendered}"
    );
}

#[test]
fn unknown_key_diagnostic_has_code_and_help() {
    use miette::Diagnostic;

    let error = ConfigError::UnknownKey {
        key: "api_kye".to_string(),
        suggestion: Some("api_key".to_string()),
        valid_keys: "base_url, api_key".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(
        help.contains("did you mean `api_key`"),
        "unexpected help text: {help}"
    );
}

#[test]
fn unknown_key_diagnostic_renders_graphically() {
    use miette::GraphicalReportHandler;

    let error = ConfigError::UnknownKey {
        key: "api_kye".to_string(),
        suggestion: Some("api_key".to_string()),
        valid_keys: "base_url, api_key".to_string(),
        span: None,
        src: None,
    };

    let mut rendered = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut rendered, &error)
        .unwrap();
    assert!(rendered.contains("api_kye"));
}

#[test]
fn load_and_validate_str_accepts_valid_toml() {
    let config = load_and_validate_str("[proxy]\nport = 8402\n").unwrap();
    assert_eq!(config.proxy.port, 8402);
}

#[test]
fn load_and_validate_str_runs_semantic_checks() {
    let errors = load_and_validate_str("[proxy]\nlog_level = \"loud\"\n").unwrap_err();
    let found = errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level")),
    );
    assert!(found, "expected a log_level validation failure");
}
