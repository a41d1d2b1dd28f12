use thiserror::Error;

/// Failures from the Argon2 layer. A wrong password is not an error.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed or checked.
    #[error("password verification failed: {0}")]
    VerificationFailed(String),

    #[error("invalid argon2 parameters: {0}")]
    InvalidParameters(String),
}
