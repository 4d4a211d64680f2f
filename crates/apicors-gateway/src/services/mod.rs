//! Built-in demo endpoint.

use axum::{
    extract::State,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use apicors_core::error::{CONTEXT_FAILED, CORS_ERROR_GROUP};

use crate::app_state::AppState;

/// Echo the resolved action, proving requests pass through the CORS layer.
pub async fn action_echo(State(app): State<AppState>, method: Method, uri: Uri) -> Response {
    match app.action_resolver().resolve(&uri) {
        Ok(ctx) => Json(json!({
            "method": method.as_str(),
            "action": ctx.action,
        }))
        .into_response(),
        Err(e) => app.errors().respond(CORS_ERROR_GROUP, CONTEXT_FAILED, &e),
    }
}
