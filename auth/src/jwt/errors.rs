use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

/// Error raised while loading the signing key.
///
/// Signing keys are built once at startup, so this error is meant to abort the
/// process before any request is served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("No token signing key configured")]
    MissingKey,

    #[error("Token signing key too short: minimum {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },
}
