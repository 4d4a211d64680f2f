//! Per-request CORS decision.
//!
//! `decide` is a pure, total function of the policy store and the request
//! attributes. The caller applies the resulting headers and either answers the
//! request itself (`short_circuit`) or forwards it to the next handler.

use crate::policy::{PolicyStore, ANY_ORIGIN, NO_MAX_AGE};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const MAX_AGE: &str = "Access-Control-Max-Age";

pub const REQUEST_METHOD: &str = "Access-Control-Request-Method";
pub const REQUEST_HEADERS: &str = "Access-Control-Request-Headers";

/// 204 No Content, returned for allowed preflight requests.
pub const PREFLIGHT_STATUS: u16 = 204;

const PREFLIGHT_METHOD: &str = "OPTIONS";

/// Request attributes the decision depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorsRequest<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub action: &'a str,
    /// `Access-Control-Request-Method`
    pub request_method: Option<&'a str>,
    /// `Access-Control-Request-Headers`
    pub request_headers: Option<&'a str>,
}

/// Outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub short_circuit: bool,
    pub status: Option<u16>,
    pub headers: Vec<(&'static str, String)>,
    pub forward: bool,
}

impl Decision {
    /// Forward untouched, no headers.
    pub fn pass() -> Self {
        Self {
            short_circuit: false,
            status: None,
            headers: Vec::new(),
            forward: true,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_pass(&self) -> bool {
        self.forward && self.headers.is_empty()
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

pub fn decide(store: &PolicyStore, req: &CorsRequest<'_>) -> Decision {
    let Some(policy) = store.policy() else {
        return Decision::pass();
    };

    if !policy.action_matcher.matches(req.action) {
        return Decision::pass();
    }

    let origin = non_empty(req.origin);
    let matched_origin = match origin {
        Some(o) => policy
            .allowed_origins
            .iter()
            .find(|a| a.as_str() == ANY_ORIGIN || a.as_str() == o)
            .map(|a| {
                // credentials forbid a literal "*", echo the concrete origin
                if policy.allow_credentials && a.as_str() == ANY_ORIGIN {
                    o.to_string()
                } else {
                    a.clone()
                }
            }),
        // No Origin header: always allowed, value is every entry joined.
        None => Some(policy.allowed_origins.join(",")),
    };

    let Some(matched_origin) = matched_origin else {
        return Decision::pass();
    };

    let preflight = req.method == PREFLIGHT_METHOD;

    let mut headers = vec![(ALLOW_ORIGIN, matched_origin)];
    if preflight {
        if let Some(m) = non_empty(req.request_method) {
            headers.push((ALLOW_METHODS, m.to_string()));
        }
        if let Some(h) = non_empty(req.request_headers) {
            headers.push((ALLOW_HEADERS, h.to_string()));
        }
    }
    if policy.allow_credentials {
        headers.push((ALLOW_CREDENTIALS, "true".to_string()));
    }
    // Emitted on actual responses too.
    if policy.max_age != NO_MAX_AGE {
        headers.push((MAX_AGE, policy.max_age.to_string()));
    }

    if preflight {
        Decision {
            short_circuit: true,
            status: Some(PREFLIGHT_STATUS),
            headers,
            forward: false,
        }
    } else {
        Decision {
            short_circuit: false,
            status: None,
            headers,
            forward: true,
        }
    }
}
