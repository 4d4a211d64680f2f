//! Shared error type across apicors crates.
//!
//! Also carries the error-group definitions the CORS layer registers with the
//! surrounding error reporter.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status paired with the code.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => 400,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CorsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum CorsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid action pattern: {0}")]
    InvalidPattern(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("request context: {0}")]
    Context(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CorsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            CorsError::BadRequest(_) | CorsError::InvalidPattern(_) => ClientCode::BadRequest,
            CorsError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            CorsError::Context(_) | CorsError::Internal(_) => ClientCode::Internal,
        }
    }
}

/// One named error within a registered group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDefine {
    pub name: &'static str,
    pub code: ClientCode,
    pub message: &'static str,
}

/// Group name the CORS layer registers under.
pub const CORS_ERROR_GROUP: &str = "cors";

/// Raised when the request context (and so the action) cannot be resolved.
pub const CONTEXT_FAILED: &str = "CONTEXT_FAILED";

/// Definitions registered for the `cors` group.
pub const CORS_ERRORS: &[ErrorDefine] = &[ErrorDefine {
    name: CONTEXT_FAILED,
    code: ClientCode::Internal,
    message: "failed to resolve request context",
}];
