// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream forwarding: rebuilds the client request against the configured
//! origin and streams the upstream response back unbuffered.

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue};
use axum::response::Response;

use routier_core::error::RoutierError;

use crate::server::ProxyState;

/// Headers owned by the transport or by the proxy itself. They are recomputed
/// per hop rather than copied from the client.
const STRIPPED_REQUEST_HEADERS: &[header::HeaderName] = &[
    header::HOST,
    header::CONTENT_LENGTH,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Sends the request to the upstream origin, replacing the client's
/// credentials with the configured API key. Content length is left to the
/// HTTP client so rewritten bodies advertise their true size.
pub(crate) async fn forward_upstream(
    state: &ProxyState,
    parts: &Parts,
    body: reqwest::Body,
) -> Result<Response, RoutierError> {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", state.upstream_origin, path_and_query);

    let mut headers = parts.headers.clone();
    for name in STRIPPED_REQUEST_HEADERS {
        headers.remove(name);
    }
    let bearer = format!("Bearer {}", state.api_key);
    let bearer = HeaderValue::from_str(&bearer).map_err(|e| {
        RoutierError::Config(format!("api key is not a valid header value: {e}"))
    })?;
    headers.insert(header::AUTHORIZATION, bearer);

    let upstream = state
        .http
        .request(parts.method.clone(), url.as_str())
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| RoutierError::Upstream {
            message: format!("request to {url} failed"),
            source: Some(Box::new(e)),
        })?;

    Ok(into_client_response(upstream))
}

/// Converts the upstream response into one we can hand back to the client,
/// dropping hop-by-hop framing headers and streaming the body through.
fn into_client_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONNECTION);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
