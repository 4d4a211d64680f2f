//! CORS middleware.
//!
//! Order per request:
//! - disabled policy => straight to the next handler (no context resolution)
//! - resolve request context (action); failure => 500 `cors/CONTEXT_FAILED`
//! - decide, then either answer the preflight or forward and annotate
//!
//! Headers on forwarded requests fill in what the downstream handler left
//! unset; a handler that sets one of them explicitly wins.

use std::borrow::Cow;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use apicors_core::decision::{
    decide, CorsRequest, Decision, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN,
};
use apicors_core::error::{CONTEXT_FAILED, CORS_ERROR_GROUP};

use crate::app_state::AppState;

/// Header value as text. Only a missing header is `None`; a present value that
/// is not UTF-8 decodes lossily, so it never equals a configured origin.
fn header_text<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<Cow<'a, str>> {
    headers.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
}

/// Request headers whose value a decision may echo back verbatim.
fn echo_sources(headers: &HeaderMap) -> Vec<(&'static str, HeaderValue)> {
    [
        (ALLOW_ORIGIN, &header::ORIGIN),
        (ALLOW_METHODS, &header::ACCESS_CONTROL_REQUEST_METHOD),
        (ALLOW_HEADERS, &header::ACCESS_CONTROL_REQUEST_HEADERS),
    ]
    .into_iter()
    .filter_map(|(out, from)| headers.get(from).map(|v| (out, v.clone())))
    .collect()
}

pub async fn cors_layer(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let store = app.policy();
    if !store.is_enabled() {
        return next.run(req).await;
    }

    let ctx = match app.action_resolver().resolve(req.uri()) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::warn!(uri = %req.uri(), error = %e, "request context failed");
            return app.errors().respond(CORS_ERROR_GROUP, CONTEXT_FAILED, &e);
        }
    };

    let (decision, echoes) = {
        let headers = req.headers();
        let origin = header_text(headers, &header::ORIGIN);
        let request_method = header_text(headers, &header::ACCESS_CONTROL_REQUEST_METHOD);
        let request_headers = header_text(headers, &header::ACCESS_CONTROL_REQUEST_HEADERS);
        let cors_req = CorsRequest {
            method: req.method().as_str(),
            origin: origin.as_deref(),
            action: &ctx.action,
            request_method: request_method.as_deref(),
            request_headers: request_headers.as_deref(),
        };
        let d = decide(&store, &cors_req);
        tracing::debug!(
            method = cors_req.method,
            action = cors_req.action,
            origin = cors_req.origin.unwrap_or(""),
            short_circuit = d.short_circuit,
            headers = d.headers.len(),
            "cors decision"
        );
        (d, echo_sources(headers))
    };

    if decision.short_circuit {
        let status = decision
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::NO_CONTENT);
        let mut res = status.into_response();
        apply_headers(res.headers_mut(), &decision, &echoes, true);
        return res;
    }

    let mut res = next.run(req).await;
    apply_headers(res.headers_mut(), &decision, &echoes, false);
    res
}

/// Value to emit for one decision header. An echoed request value goes out
/// with its original bytes, even when those are not UTF-8.
fn header_value(
    name: &str,
    value: &str,
    echoes: &[(&'static str, HeaderValue)],
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let raw = echoes
        .iter()
        .find(|(n, raw)| *n == name && String::from_utf8_lossy(raw.as_bytes()) == value);
    match raw {
        Some((_, raw)) => Ok(raw.clone()),
        None => HeaderValue::from_str(value),
    }
}

fn apply_headers(
    out: &mut HeaderMap,
    decision: &Decision,
    echoes: &[(&'static str, HeaderValue)],
    overwrite: bool,
) {
    for (name, value) in &decision.headers {
        let value = match header_value(name, value, echoes) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(%name, error = %e, "skipping invalid cors header value");
                continue;
            }
        };
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(%name, error = %e, "skipping invalid cors header name");
                continue;
            }
        };
        if overwrite || !out.contains_key(&name) {
            out.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn forward(headers: Vec<(&'static str, String)>) -> Decision {
        Decision {
            short_circuit: false,
            status: None,
            headers,
            forward: true,
        }
    }

    #[test]
    fn downstream_headers_win_on_forward() {
        let decision = forward(vec![(ALLOW_ORIGIN, "http://a.com".into())]);
        let mut out = HeaderMap::new();
        out.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("http://own.com"),
        );
        apply_headers(&mut out, &decision, &[], false);
        assert_eq!(
            out.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://own.com"))
        );
    }

    #[test]
    fn invalid_values_are_skipped() {
        let decision = forward(vec![
            (ALLOW_ORIGIN, "bad\nvalue".into()),
            ("Access-Control-Max-Age", "60".into()),
        ]);
        let mut out = HeaderMap::new();
        apply_headers(&mut out, &decision, &[], true);
        assert!(out.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(
            out.get(header::ACCESS_CONTROL_MAX_AGE),
            Some(&HeaderValue::from_static("60"))
        );
    }

    #[test]
    fn missing_and_unreadable_headers_differ() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_bytes(b"http://\xe4.com").unwrap(),
        );
        let origin = header_text(&headers, &header::ORIGIN).unwrap();
        assert_eq!(origin, "http://\u{fffd}.com");
        assert!(header_text(&headers, &header::ACCESS_CONTROL_REQUEST_METHOD).is_none());
    }

    #[test]
    fn echoed_origin_keeps_raw_bytes() {
        let raw = HeaderValue::from_bytes(b"http://\xe4.com").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, raw.clone());

        let decision = forward(vec![(ALLOW_ORIGIN, "http://\u{fffd}.com".into())]);
        let mut out = HeaderMap::new();
        apply_headers(&mut out, &decision, &echo_sources(&headers), true);
        assert_eq!(out.get(header::ACCESS_CONTROL_ALLOW_ORIGIN), Some(&raw));
    }
}
