//! Error-group registry and JSON error responses.
//!
//! Layers register their named error definitions under a group at startup;
//! handlers answer with the registered status and code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use serde_json::json;

use apicors_core::error::{ClientCode, CorsError, ErrorDefine};

#[derive(Default)]
pub struct ErrorRegistry {
    groups: DashMap<&'static str, &'static [ErrorDefine]>,
}

impl ErrorRegistry {
    pub fn register_group(&self, group: &'static str, defines: &'static [ErrorDefine]) {
        if self.groups.insert(group, defines).is_some() {
            tracing::warn!(group, "error group registered twice; replaced");
        }
    }

    pub fn registered_groups(&self) -> Vec<&'static str> {
        self.groups.iter().map(|e| *e.key()).collect()
    }

    pub fn lookup(&self, group: &str, name: &str) -> Option<ErrorDefine> {
        self.groups
            .get(group)
            .and_then(|defs| defs.iter().find(|d| d.name == name).copied())
    }

    /// Error response for a registered definition. Unknown definitions fall
    /// back to the error's own client code.
    pub fn respond(&self, group: &str, name: &str, err: &CorsError) -> Response {
        let (code, client_code, msg) = match self.lookup(group, name) {
            Some(def) => (def.name, def.code, def.message),
            None => {
                let cc = err.client_code();
                (cc.as_str(), cc, "unregistered error")
            }
        };
        error_response(group, code, client_code, &format!("{msg}: {err}"))
    }
}

fn error_response(group: &str, code: &str, client_code: ClientCode, msg: &str) -> Response {
    let status = StatusCode::from_u16(client_code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({
        "group": group,
        "code": code,
        "msg": msg,
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicors_core::error::{CONTEXT_FAILED, CORS_ERRORS, CORS_ERROR_GROUP};

    #[test]
    fn lookup_registered_define() {
        let reg = ErrorRegistry::default();
        reg.register_group(CORS_ERROR_GROUP, CORS_ERRORS);
        assert_eq!(reg.registered_groups(), vec!["cors"]);

        let def = reg.lookup("cors", CONTEXT_FAILED);
        assert_eq!(def.map(|d| d.code), Some(ClientCode::Internal));
        assert!(reg.lookup("cors", "NOPE").is_none());
        assert!(reg.lookup("auth", CONTEXT_FAILED).is_none());
    }

    #[test]
    fn respond_uses_define_status() {
        let reg = ErrorRegistry::default();
        reg.register_group(CORS_ERROR_GROUP, CORS_ERRORS);
        let res = reg.respond(
            CORS_ERROR_GROUP,
            CONTEXT_FAILED,
            &CorsError::Context("ambiguous".into()),
        );
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn respond_unregistered_falls_back_to_client_code() {
        let reg = ErrorRegistry::default();
        let res = reg.respond("cors", CONTEXT_FAILED, &CorsError::BadRequest("x".into()));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
