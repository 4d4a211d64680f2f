//! Request context types shared across layers.
//!
//! The CORS layer only needs the action identifier; resolving it is kept
//! behind [`ActionResolver`] so other conventions can be plugged in.

pub mod action;

pub use action::{ActionResolver, QueryActionResolver, RequestContext};
