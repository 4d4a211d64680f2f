//! Transport layer (HTTP middleware).
//!
//! Adapts the pure CORS decision to axum's handler chain.

pub mod cors;
