use thiserror::Error;

/// Failures while signing or checking a bearer token.
///
/// Callers facing clients collapse all of these into one 401.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("token signing failed: {0}")]
    EncodingFailed(String),

    #[error("token could not be decoded: {0}")]
    DecodingFailed(String),

    /// `exp` is at or before the clock's current time.
    #[error("token expired")]
    TokenExpired,

    #[error("token rejected: {0}")]
    InvalidToken(String),
}
