//! Top-level facade crate for apicors.
//!
//! Re-exports the decision core and the axum gateway so users can depend on a single crate.

pub mod core {
    pub use apicors_core::*;
}

pub mod gateway {
    pub use apicors_gateway::*;
}
