// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locally bound reverse proxy that classifies chat-completion requests and
//! rewrites their `model` field before forwarding upstream.
//!
//! Only requests opting in with a sentinel model name (`auto` or
//! `routier/auto`) are touched; every other request passes through
//! byte-for-byte with the configured upstream credentials attached.

mod forward;
mod intercept;
mod server;

pub use server::{bind_or_adopt, start_proxy, BindOutcome, ProxyHandle, HEALTH_PATH};
