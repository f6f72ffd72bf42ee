// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the routier proxy.
//!
//! TOML files are merged across the XDG hierarchy with `ROUTIER_*` env
//! overrides, deserialized with `deny_unknown_fields`, then semantically
//! validated. Failures come back as miette diagnostics with source spans
//! and typo suggestions rather than a bare serde message.
//!
//! ```no_run
//! let config = routier_config::load_and_validate().expect("config errors");
//! println!("proxy port: {}", config.proxy.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ModelsConfig, ProxyConfig, RoutierConfig, UpstreamConfig};

/// Load from the XDG hierarchy and environment, then validate.
///
/// Every problem found is reported, not just the first: figment errors are
/// expanded one diagnostic per failure and validation collects all of its
/// complaints before returning.
pub fn load_and_validate() -> Result<RoutierConfig, Vec<ConfigError>> {
    finish(loader::load_config(), loader::read_sources)
}

/// Load from a TOML string and validate. No files or env vars involved.
pub fn load_and_validate_str(toml_content: &str) -> Result<RoutierConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Shared tail of the load paths. Sources are read lazily; they are only
/// needed when figment reports an error that may carry a file span.
fn finish(
    loaded: Result<RoutierConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<RoutierConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(diagnostic::diagnose(err, &sources())),
    }
}
