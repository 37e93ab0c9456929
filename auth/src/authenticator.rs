use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::SigningKey;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::jwt::DEFAULT_TOKEN_TTL_HOURS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordPolicy;

/// Authentication coordinator combining password hashing and token handling.
///
/// Built once at startup from the signing key and shared read-only between
/// requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator with the default password policy and a
    /// 10 hour token lifetime.
    ///
    /// # Arguments
    /// * `key` - Signing key for tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(key: &SigningKey) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(key),
            token_verifier: TokenVerifier::new(key),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Replace the password hashing cost policy.
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_hasher = PasswordHasher::with_policy(policy);
        self
    }

    /// Replace the lifetime of issued tokens.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// Blocking and CPU-bound.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Blocking and CPU-bound.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token for `subject` with the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_issuer.issue(subject, self.token_ttl)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_verifier.verify(token)
    }
}
