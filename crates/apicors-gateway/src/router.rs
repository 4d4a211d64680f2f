//! Axum router wiring.
//!
//! Every route sits behind the CORS layer; `OPTIONS` is routed so allowed
//! preflights never reach a 405.

use axum::{middleware, routing::any, routing::get, Router};

use crate::{app_state::AppState, ops, services, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/v1/api", any(services::action_echo))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            transport::cors::cors_layer,
        ))
        .with_state(state)
}
