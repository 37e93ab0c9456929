use async_trait::async_trait;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and log them in.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// * `Success` - User created, token issued
    /// * `Conflict` - Email is already registered
    /// * `SystemError` - Storage or hashing failure (logged, not exposed)
    async fn register(&self, command: RegisterCommand) -> AuthResult;

    /// Authenticate a returning user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// * `Success` - Credentials match, token issued
    /// * `Rejected` - Unknown email or wrong password
    /// * `SystemError` - Storage or hashing failure (logged, not exposed)
    async fn login(&self, command: LoginCommand) -> AuthResult;

    /// Validate a bearer token and return the authenticated identity.
    ///
    /// # Errors
    /// * `Malformed` - Token or its subject is structurally invalid
    /// * `InvalidSignature` - Token was forged or tampered with
    /// * `Expired` - Token is past its expiry
    async fn verify(&self, token: &str) -> Result<UserId, auth::TokenError>;
}

/// Credential store: persistence operations for user records.
///
/// Implementations own the uniqueness of emails; `insert` must be atomic with
/// respect to that constraint.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user unless the email is already taken.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email address, matched exactly
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
