use std::sync::Arc;
use std::sync::OnceLock;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and JWT handling.
///
/// Owns the process-wide signing secret (through its [`JwtHandler`]) and the
/// clock that stamps and checks token lifetimes.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Identity fields encoded into a token.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub id: i64,
    pub email: &'a str,
    pub role: &'a str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator using the system clock and default hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            clock: Arc::new(SystemClock),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Replace the clock used for issuing and validating tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the password hasher (e.g. to tune the Argon2 cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate a JWT token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: TokenSubject<'_>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Spend one password verification on an identity that does not exist.
    ///
    /// Runs against a hash made with the configured cost, so a login for an
    /// unknown account takes as long as one with a wrong password.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing the decoy failed
    pub fn verify_decoy(&self, password: &str) -> Result<(), PasswordError> {
        let decoy_hash = match self.decoy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.password_hasher.hash(DECOY_PASSWORD)?;
                self.decoy_hash.get_or_init(|| hash)
            }
        };

        self.password_hasher.verify(password, decoy_hash)?;
        Ok(())
    }

    /// Issue a token for an identity without password verification.
    ///
    /// Used right after registration, when the caller just proved the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: TokenSubject<'_>) -> Result<String, JwtError> {
        let claims =
            Claims::for_identity(subject.id, subject.email, subject.role, self.clock.now());
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a JWT token.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past according to the clock
    /// * `InvalidToken` / `DecodingFailed` - Bad signature or malformed token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::clock::ManualClock;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn cheap_authenticator() -> Authenticator {
        Authenticator::new(SECRET)
            .with_password_hasher(PasswordHasher::with_cost(1024, 1, 1).unwrap())
    }

    fn alice() -> TokenSubject<'static> {
        TokenSubject {
            id: 17,
            email: "alice@ex.com",
            role: "Admin",
        }
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = cheap_authenticator();

        let hash = authenticator
            .hash_password("password123")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("password123", &hash, alice())
            .expect("Authentication failed");
        assert!(!result.access_token.is_empty());

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "17");
        assert_eq!(decoded.email, "alice@ex.com");
        assert_eq!(decoded.role, "Admin");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = cheap_authenticator();

        let hash = authenticator
            .hash_password("password123")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, alice());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_decoy_reuses_one_hash() {
        let authenticator = cheap_authenticator();
        assert!(authenticator.decoy_hash.get().is_none());

        authenticator.verify_decoy("password123").unwrap();
        let first = authenticator.decoy_hash.get().cloned().unwrap();
        assert!(first.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

        authenticator.verify_decoy(DECOY_PASSWORD).unwrap();
        assert_eq!(authenticator.decoy_hash.get(), Some(&first));
    }

    #[test]
    fn test_replacing_hasher_resets_decoy() {
        let authenticator = cheap_authenticator();
        authenticator.verify_decoy("password123").unwrap();

        let authenticator = authenticator
            .with_password_hasher(PasswordHasher::with_cost(2048, 1, 1).unwrap());
        assert!(authenticator.decoy_hash.get().is_none());

        authenticator.verify_decoy("password123").unwrap();
        assert!(authenticator
            .decoy_hash
            .get()
            .is_some_and(|hash| hash.contains("m=2048")));
    }

    #[test]
    fn test_token_expires_after_24_hours() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let authenticator = Authenticator::new(SECRET).with_clock(clock.clone());

        let token = authenticator.issue_token(alice()).unwrap();

        clock.advance(Duration::hours(23));
        assert!(authenticator.validate_token(&token).is_ok());

        clock.advance(Duration::hours(2));
        assert!(matches!(
            authenticator.validate_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_validate_token_from_other_secret() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes");
        let token = issuer.issue_token(alice()).unwrap();

        let authenticator = Authenticator::new(SECRET);
        assert!(authenticator.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
