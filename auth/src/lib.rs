//! Credential primitives library
//!
//! Provides the building blocks of the authentication core:
//! - Password hashing (Argon2id, salted, configurable cost)
//! - Signed, time-bounded identity tokens (JWT, HS256)
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenIssuer, TokenVerifier};
//! use chrono::Duration;
//!
//! let key = SigningKey::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = TokenIssuer::new(&key).issue("user123", Duration::hours(10)).unwrap();
//! let claims = TokenVerifier::new(&key).verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningKey};
//!
//! let key = SigningKey::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&key);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let token = auth.issue_token("user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::ConfigurationError;
pub use jwt::SigningKey;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use jwt::DEFAULT_TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
