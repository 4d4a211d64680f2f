//! apicors gateway library entry.
//!
//! Wires configuration, the reloadable policy store, request-context
//! resolution and the CORS middleware into an axum stack. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod errors;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;
pub mod transport;
