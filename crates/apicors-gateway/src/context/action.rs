use axum::http::Uri;

use apicors_core::error::{CorsError, Result};

/// Per-request metadata resolved before the CORS decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Application-level action; empty when the request names none.
    pub action: String,
}

/// Derives the request context from the request line. Bodies are never read.
pub trait ActionResolver: Send + Sync {
    fn resolve(&self, uri: &Uri) -> Result<RequestContext>;
}

/// Reads the action from a query parameter (`?api_action=User.Login`).
#[derive(Debug, Clone)]
pub struct QueryActionResolver {
    param: String,
}

impl QueryActionResolver {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }
}

impl ActionResolver for QueryActionResolver {
    fn resolve(&self, uri: &Uri) -> Result<RequestContext> {
        let mut action: Option<String> = None;
        for (k, v) in parse_query(uri.query().unwrap_or_default())? {
            if k != self.param {
                continue;
            }
            if let Some(prev) = &action {
                if *prev != v {
                    return Err(CorsError::Context(format!(
                        "conflicting values for {}: {prev} / {v}",
                        self.param
                    )));
                }
                continue;
            }
            action = Some(v);
        }

        Ok(RequestContext {
            action: action.unwrap_or_default(),
        })
    }
}

/// Strict `application/x-www-form-urlencoded` query parsing. Every pair is
/// decoded, so one bad escape anywhere rejects the whole query.
pub fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|seg| !seg.is_empty())
        .map(|seg| -> Result<(String, String)> {
            let (k, v) = seg.split_once('=').unwrap_or((seg, ""));
            Ok((decode_component(k)?, decode_component(v)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let hex = bytes.get(i + 1..i + 3);
        if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
            return Err(CorsError::Context(format!("invalid percent-escape in {raw:?}")));
        }
    }
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| CorsError::Context(format!("query is not valid utf-8: {e}")))
}
