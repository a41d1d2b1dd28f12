use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT payload carried by bearer tokens.
///
/// Encodes who the caller is (`sub`, `email`) and what they may do (`role`).
/// Roles travel as plain strings; each service parses them into its own type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Email address of the identity at issuance time
    pub email: String,

    /// Role name at issuance time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity, expiring [`TOKEN_TTL_HOURS`] after `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier
    /// * `email` - Identity email
    /// * `role` - Role name
    /// * `issued_at` - Issuance instant
    pub fn for_identity(
        subject: impl ToString,
        email: impl Into<String>,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_TTL_HOURS);

        Self {
            sub: subject.to_string(),
            email: email.into(),
            role: role.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
