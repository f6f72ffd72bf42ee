// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading through Figment.
//!
//! Precedence, lowest to highest: compiled defaults, `/etc/routier/routier.toml`,
//! the XDG user file, `./routier.toml`, then `ROUTIER_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RoutierConfig;

/// Load configuration from the standard file hierarchy plus env overrides.
pub fn load_config() -> Result<RoutierConfig, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(RoutierConfig::default()));
    for path in config_file_candidates() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider()).extract()
}

/// Load configuration from a TOML string alone. No files, no env vars.
pub fn load_config_from_str(toml_content: &str) -> Result<RoutierConfig, figment::Error> {
    Figment::from(Serialized::defaults(RoutierConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env overrides on top.
pub fn load_config_from_path(path: &Path) -> Result<RoutierConfig, figment::Error> {
    Figment::from(Serialized::defaults(RoutierConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Candidate config files in merge order. Files that do not exist are
/// skipped by Figment's `Toml::file`.
fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("/etc/routier/routier.toml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("routier/routier.toml"));
    }
    candidates.push(PathBuf::from("routier.toml"));
    candidates
}

/// Read the content of every candidate file that exists, keyed by the
/// absolute path Figment reports in its error metadata. Used to resolve
/// source spans for diagnostics.
pub(crate) fn read_sources() -> Vec<(String, String)> {
    config_file_candidates()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((absolute_display(&path), content))
        })
        .collect()
}

fn absolute_display(path: &Path) -> String {
    if path.is_absolute() {
        return path.display().to_string();
    }
    match std::env::current_dir() {
        Ok(dir) => dir.join(path).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Env provider mapping `ROUTIER_<SECTION>_<KEY>` onto `<section>.<key>`.
///
/// `Env::split("_")` would be wrong here: `ROUTIER_UPSTREAM_API_KEY` must
/// become `upstream.api_key`, not `upstream.api.key`, so each section prefix
/// is mapped explicitly and the rest of the name is left intact.
fn env_provider() -> Env {
    Env::prefixed("ROUTIER_").map(|key| {
        let lowered = key.as_str();
        lowered
            .replacen("upstream_", "upstream.", 1)
            .replacen("proxy_", "proxy.", 1)
            .replacen("models_", "models.", 1)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
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
    fn partial_section_keeps_remaining_defaults() {
        let config = load_config_from_str("[proxy]\nport = 9000\n").unwrap();
        assert_eq!(config.proxy.port, 9000);
        assert_eq!(config.proxy.host, "127.0.0.1");
        assert_eq!(config.proxy.log_level, "info");
    }

    #[test]
    fn local_file_is_the_highest_precedence_candidate() {
        let candidates = config_file_candidates();
        assert_eq!(
            candidates.first().unwrap(),
            Path::new("/etc/routier/routier.toml")
        );
        assert_eq!(candidates.last().unwrap(), Path::new("routier.toml"));
    }
}
