// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translates figment's deserialization failures into miette diagnostics.
//!
//! Unknown keys get a "did you mean" suggestion computed with Jaro-Winkler
//! similarity, plus a source span pointing at the offending line whenever the
//! value came from a TOML file on disk.

#![allow(unused_assignments)] // the Diagnostic derive expands to code that trips this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Similarity floor below which a candidate key is not worth suggesting.
/// High enough to filter noise, low enough to catch transpositions like
/// `api_kye` and doubled letters like `reasonning`.
const MIN_SIMILARITY: f64 = 0.75;

/// A configuration problem, carrying whatever context miette needs to render
/// an Elm-style report.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section of the schema knows about.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(routier::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The key as written by the user.
        key: String,
        /// Closest schema key, when one is similar enough.
        suggestion: Option<String>,
        /// Comma-separated keys the section accepts.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that deserialized to the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(routier::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the key, e.g. `proxy.port`.
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type for this key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A well-formed value that fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(routier::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(routier::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(key) => format!("did you mean `{key}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Expand a `figment::Error` into one diagnostic per underlying failure.
///
/// Figment batches every problem it found into a single error value; this
/// walks them all so a config with three typos reports three diagnostics,
/// not just the first.
pub fn diagnose(err: figment::Error, sources: &[(String, String)]) -> Vec<ConfigError> {
    err.into_iter().map(|e| explain(e, sources)).collect()
}

fn explain(error: figment::Error, sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    let section: Vec<String> = error.path.iter().map(ToString::to_string).collect();
    match &error.kind {
        Kind::UnknownField(field, allowed) => {
            let (span, src) = locate(&error, &section, field, sources).unzip();
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: nearest_key(field, allowed),
                valid_keys: allowed.join(", "),
                span,
                src,
            }
        }
        Kind::InvalidType(actual, expected) => {
            // The last path element is the key itself; the rest is its section.
            let (span, src) = section
                .split_last()
                .and_then(|(field, rest)| locate(&error, rest, field, sources))
                .unzip();
            ConfigError::InvalidType {
                key: section.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
                span,
                src,
            }
        }
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Resolve a span for `field` inside the TOML file the error came from.
///
/// Only file-backed figment sources can be located; values merged from
/// strings or the environment yield `None` and render without a span.
fn locate(
    error: &figment::Error,
    section: &[String],
    field: &str,
    sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let path = match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(file) => file.display().to_string(),
        _ => return None,
    };
    let (name, content) = sources.iter().find(|(candidate, _)| *candidate == path)?;
    let offset = key_offset(content, section, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(name, content.clone()),
    ))
}

/// Byte offset of `key` within its `[section]`, or from the top of the file
/// when `section` is empty. The search stops at the next section header so a
/// same-named key elsewhere in the file is never matched.
fn key_offset(content: &str, section: &[String], key: &str) -> Option<usize> {
    let header = section.first().map(|name| format!("[{name}]"));
    let mut in_scope = header.is_none();
    let mut offset = 0;

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(header) = &header {
            if trimmed == header.as_str() {
                in_scope = true;
            } else if in_scope && trimmed.starts_with('[') {
                return None;
            }
        }
        if in_scope {
            let unindented = line.trim_start();
            if let Some(rest) = unindented.strip_prefix(key) {
                if rest.trim_start().starts_with('=') {
                    return Some(offset + (line.len() - unindented.len()));
                }
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if any clears the floor.
pub fn nearest_key(unknown: &str, valid: &[&str]) -> Option<String> {
    valid
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > MIN_SIMILARITY)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render every diagnostic to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        if handler
            .render_report(&mut out, error as &dyn Diagnostic)
            .is_err()
        {
            out.push_str(&format!("error: {error}\n"));
        }
    }
    eprint!("{out}");
}
