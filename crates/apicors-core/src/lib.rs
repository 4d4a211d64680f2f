//! apicors core: transport-agnostic CORS policy and decision logic.
//!
//! This crate holds the policy store, the action matcher and the per-request
//! decision function, plus the error surface shared with the gateway. It
//! carries no HTTP or runtime dependencies so any handler chain can drive it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! The decision path is total; fallible paths (pattern compilation) surface as
//! `CorsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod decision;
pub mod error;
pub mod matcher;
pub mod policy;

/// Shared result type.
pub use error::{CorsError, Result};

pub use decision::{decide, CorsRequest, Decision};
pub use matcher::{ActionMatcher, PatternMatcher};
pub use policy::{CorsSettings, PolicyStore};
