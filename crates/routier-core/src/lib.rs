// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the routier proxy.
//!
//! Provides the error taxonomy, the difficulty [`Tier`] type, and the
//! [`RouterHooks`] observer trait shared by the classifier, proxy, and
//! binary crates.

pub mod error;
pub mod hooks;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RoutierError;
pub use hooks::{NoopHooks, RouteEvent, RouterHooks};
pub use types::Tier;
