// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proxy server lifecycle: port binding, single-instance arbitration, and
//! graceful shutdown.
//!
//! Startup follows a two-step arbitration protocol so that two concurrently
//! launched instances collapse into one. The first instance binds the port;
//! a second instance that hits `AddrInUse` probes `/health` on the same
//! address and, if a healthy routier answers, adopts it instead of failing.
//! Anything else listening on the port is a hard [`RoutierError::PortConflict`].

use std::sync::Arc;
use std::time::Duration;

use axum::routing::any;
use axum::{Json, Router};
use reqwest::Url;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use routier_classifier::WeightedClassifier;
use routier_config::RoutierConfig;
use routier_core::error::RoutierError;
use routier_core::hooks::RouterHooks;

use crate::intercept::intercept;

/// Route served locally by the proxy itself, never forwarded upstream.
pub const HEALTH_PATH: &str = "/health";

/// Probe timeout when deciding whether an occupied port holds a healthy
/// routier instance or a foreign process.
const ADOPT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Shared state handed to every request handler.
pub(crate) struct ProxyState {
    pub(crate) classifier: WeightedClassifier,
    pub(crate) http: reqwest::Client,
    pub(crate) upstream_origin: String,
    pub(crate) api_key: String,
    pub(crate) hooks: Arc<dyn RouterHooks>,
}

/// Running proxy, either owned by this process or adopted from another.
#[derive(Debug)]
pub struct ProxyHandle {
    port: u16,
    inner: HandleInner,
}

#[derive(Debug)]
enum HandleInner {
    Bound {
        token: CancellationToken,
        task: JoinHandle<()>,
    },
    Adopted,
}

impl ProxyHandle {
    /// Port the proxy is reachable on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// True when this handle refers to a pre-existing instance owned by
    /// another process.
    pub fn is_adopted(&self) -> bool {
        matches!(self.inner, HandleInner::Adopted)
    }

    /// Stops the server if this process owns it. Adopted instances are left
    /// running; the owning process is responsible for their lifetime.
    pub async fn shutdown(self) {
        match self.inner {
            HandleInner::Bound { token, task } => {
                token.cancel();
                let _ = task.await;
            }
            HandleInner::Adopted => {}
        }
    }
}

/// Outcome of the port arbitration step.
#[derive(Debug)]
pub enum BindOutcome {
    /// We own the listener.
    Bound(TcpListener),
    /// A healthy routier instance already serves this address.
    Adopted,
}

/// Starts the proxy described by `config`, or adopts an already-running
/// instance on the same port.
///
/// Fails with [`RoutierError::Config`] when no upstream API key is
/// configured, since every forwarded request must carry credentials.
pub async fn start_proxy(
    config: &RoutierConfig,
    hooks: Arc<dyn RouterHooks>,
) -> Result<ProxyHandle, RoutierError> {
    let api_key = config
        .upstream
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            RoutierError::Config(
                "upstream.api_key is not set; configure it in routier.toml or via \
                 ROUTIER_UPSTREAM_API_KEY"
                    .to_string(),
            )
        })?
        .to_string();
    let upstream_origin = upstream_origin(&config.upstream.base_url)?;

    match bind_or_adopt(&config.proxy.host, config.proxy.port).await? {
        BindOutcome::Adopted => {
            info!(
                host = %config.proxy.host,
                port = config.proxy.port,
                "healthy routier instance already listening, adopting it"
            );
            hooks.on_ready(config.proxy.port);
            Ok(ProxyHandle {
                port: config.proxy.port,
                inner: HandleInner::Adopted,
            })
        }
        BindOutcome::Bound(listener) => {
            let port = listener
                .local_addr()
                .map_err(|e| RoutierError::Internal(format!("listener has no local addr: {e}")))?
                .port();
            let state = Arc::new(ProxyState {
                classifier: WeightedClassifier::new(config.models.clone()),
                http: build_http_client()?,
                upstream_origin,
                api_key,
                hooks: Arc::clone(&hooks),
            });
            let app = router(state);
            let token = CancellationToken::new();
            let server_token = token.clone();
            let task = tokio::spawn(async move {
                let shutdown = async move { server_token.cancelled().await };
                if let Err(e) = axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown)
                    .await
                {
                    error!(error = %e, "proxy server exited with error");
                }
            });
            info!(host = %config.proxy.host, port, "routier proxy listening");
            hooks.on_ready(port);
            Ok(ProxyHandle {
                port,
                inner: HandleInner::Bound { token, task },
            })
        }
    }
}

/// Binds `host:port`, falling back to adoption when the port is taken by a
/// healthy routier instance.
pub async fn bind_or_adopt(host: &str, port: u16) -> Result<BindOutcome, RoutierError> {
    let addr = format!("{host}:{port}");
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(BindOutcome::Bound(listener)),
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            if probe_health(host, port).await {
                Ok(BindOutcome::Adopted)
            } else {
                Err(RoutierError::PortConflict { port })
            }
        }
        Err(e) => Err(RoutierError::Internal(format!(
            "failed to bind {addr}: {e}"
        ))),
    }
}

/// Asks `host:port` for `/health` and checks for our own readiness payload.
/// Any transport error, timeout, or unexpected body means the occupant is
/// not a routier instance.
async fn probe_health(host: &str, port: u16) -> bool {
    let client = match reqwest::Client::builder().timeout(ADOPT_PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(_) => return false,
    };
    let url = format!("http://{host}:{port}{HEALTH_PATH}");
    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => resp
            .json::<Value>()
            .await
            .map(|body| body.get("status").and_then(Value::as_str) == Some("ok"))
            .unwrap_or(false),
        _ => false,
    }
}

fn router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, any(health))
        .fallback(intercept)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness endpoint, also the signature checked during port arbitration.
/// Matched by path alone so probes are free to use whatever method they like;
/// nothing aimed at `/health` is ever forwarded upstream.
async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reduces the configured base URL to its origin so request paths compose
/// cleanly regardless of trailing slashes in the config value.
fn upstream_origin(base_url: &str) -> Result<String, RoutierError> {
    let url = Url::parse(base_url)
        .map_err(|e| RoutierError::Config(format!("invalid upstream.base_url {base_url:?}: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(RoutierError::Config(format!(
            "upstream.base_url must be http or https, got {base_url:?}"
        )));
    }
    Ok(url.origin().ascii_serialization())
}

/// Forwarding client. No overall timeout: streamed completions can legally
/// run for minutes, so only connect establishment is bounded.
fn build_http_client() -> Result<reqwest::Client, RoutierError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| RoutierError::Internal(format!("failed to build http client: {e}")))
}
