// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request interception: decides per request whether to rewrite, pass
//! through, or reject.
//!
//! Only POST requests whose path ends in `/chat/completions` are inspected,
//! and of those only bodies that name an auto-routing sentinel model are
//! rewritten. Everything else crosses the proxy untouched, including bodies
//! that fail to parse as JSON; the upstream is the authority on malformed
//! requests we were never asked to route.

use std::sync::Arc;

use axum::body::{to_bytes, Bytes};
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use routier_classifier::{RoutingDecision, WeightedClassifier};
use routier_core::error::RoutierError;
use routier_core::hooks::RouteEvent;
use routier_core::types::Tier;
use routier_cost::{estimate_savings, estimate_tokens, NOMINAL_OUTPUT_TOKENS};

use crate::forward::forward_upstream;
use crate::server::ProxyState;

/// Model names that opt a request into routing.
pub(crate) const AUTO_SENTINELS: &[&str] = &["auto", "routier/auto"];

/// Longest prompt prefix carried into [`RouteEvent::prompt_preview`].
const PREVIEW_CHARS: usize = 100;

/// What to do with a completions request after inspecting its body.
pub(crate) enum CompletionAction {
    /// Forward these bytes upstream exactly as received.
    Forward(Bytes),
    /// Forward a rewritten body and report the routing decision.
    Rewrite {
        body: Vec<u8>,
        decision: RoutingDecision,
        event: RouteEvent,
    },
    /// Refuse to route; the request asked for routing but is unusable.
    Reject { message: String },
}

/// Fallback handler for every path except `/health`.
pub(crate) async fn intercept(State(state): State<Arc<ProxyState>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();

    if !is_completions_request(&parts.method, parts.uri.path()) {
        let body = reqwest::Body::wrap_stream(body.into_data_stream());
        return forward_or_bad_gateway(&state, &parts, body).await;
    }

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let err = RoutierError::Internal(format!("failed to read request body: {e}"));
            state.hooks.on_error(&err);
            warn!(error = %err, "dropping unreadable completions request");
            return reject_response(&format!("failed to read request body: {e}"));
        }
    };

    match plan_completion(&state.classifier, &bytes) {
        CompletionAction::Forward(original) => {
            forward_or_bad_gateway(&state, &parts, reqwest::Body::from(original)).await
        }
        CompletionAction::Rewrite {
            body,
            decision,
            event,
        } => {
            info!(
                original_model = %event.original_model,
                routed_model = %event.routed_model,
                tier = %decision.tier,
                confidence = decision.confidence,
                method = %decision.method,
                estimated_savings = event.estimated_savings,
                "routed completions request"
            );
            state.hooks.on_routed(&event);
            forward_or_bad_gateway(&state, &parts, reqwest::Body::from(body)).await
        }
        CompletionAction::Reject { message } => {
            let err = RoutierError::RequestParse {
                message: message.clone(),
            };
            state.hooks.on_error(&err);
            warn!(error = %err, "rejecting unroutable auto request");
            reject_response(&message)
        }
    }
}

/// True for requests the routing layer is allowed to inspect.
pub(crate) fn is_completions_request(method: &Method, path: &str) -> bool {
    method == Method::POST && path.ends_with("/chat/completions")
}

pub(crate) fn is_auto_sentinel(model: &str) -> bool {
    AUTO_SENTINELS.contains(&model)
}

/// Pure routing decision for one completions body. Split from the handler so
/// the decision table is testable without a running server.
pub(crate) fn plan_completion(classifier: &WeightedClassifier, bytes: &Bytes) -> CompletionAction {
    let Ok(mut value) = serde_json::from_slice::<Value>(bytes) else {
        return CompletionAction::Forward(bytes.clone());
    };
    let Some(model) = value.get("model").and_then(Value::as_str) else {
        return CompletionAction::Forward(bytes.clone());
    };
    if !is_auto_sentinel(model) {
        return CompletionAction::Forward(bytes.clone());
    }
    let original_model = model.to_string();

    let Some(messages) = value.get("messages").and_then(Value::as_array) else {
        return CompletionAction::Reject {
            message: "auto-routed request has no messages array".to_string(),
        };
    };
    if messages.is_empty() {
        return CompletionAction::Reject {
            message: "auto-routed request has an empty messages array".to_string(),
        };
    }
    let Some(prompt) = extract_prompt(messages) else {
        return CompletionAction::Reject {
            message: "last message has no usable content".to_string(),
        };
    };

    let decision = classifier.classify(&prompt);
    value["model"] = Value::String(decision.model.clone());
    let body = match serde_json::to_vec(&value) {
        Ok(body) => body,
        Err(e) => {
            return CompletionAction::Reject {
                message: format!("failed to serialize rewritten body: {e}"),
            };
        }
    };

    // Savings are reported against the complex-tier model: the cost a
    // routing-unaware client would have paid for the same request.
    let baseline = classifier.models().model_for(Tier::Complex);
    let input_tokens = estimate_tokens(&prompt);
    let event = RouteEvent {
        original_model,
        routed_model: decision.model.clone(),
        tier: decision.tier,
        confidence: decision.confidence,
        estimated_savings: estimate_savings(
            &decision.model,
            baseline,
            input_tokens,
            NOMINAL_OUTPUT_TOKENS,
        ),
        prompt_preview: prompt_preview(&prompt),
    };
    CompletionAction::Rewrite {
        body,
        decision,
        event,
    }
}

/// Classification text from the last message. String content is used as-is;
/// structured content (multimodal parts) is classified by its JSON form.
fn extract_prompt(messages: &[Value]) -> Option<String> {
    let content = messages.last()?.get("content")?;
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => serde_json::to_string(other).ok(),
    }
}

fn prompt_preview(prompt: &str) -> String {
    prompt.chars().take(PREVIEW_CHARS).collect()
}

async fn forward_or_bad_gateway(
    state: &ProxyState,
    parts: &Parts,
    body: reqwest::Body,
) -> Response {
    match forward_upstream(state, parts, body).await {
        Ok(response) => response,
        Err(err) => {
            state.hooks.on_error(&err);
            error!(error = %err, "upstream forwarding failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "upstream request failed",
                    "details": error_details(&err),
                })),
            )
                .into_response()
        }
    }
}

fn reject_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

fn error_details(err: &RoutierError) -> String {
    match err {
        RoutierError::Upstream {
            message,
            source: Some(source),
        } => format!("{message}: {source}"),
        other => other.to_string(),
    }
}
