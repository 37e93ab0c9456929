use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RejectionPolicy;
use crate::domain::user::models::RejectionReason;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration, login and token checks.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Password hashing runs on tokio's blocking pool so it never stalls other
/// requests on the async workers.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    rejection_policy: RejectionPolicy,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token issuer/verifier
    ///
    /// # Returns
    /// Service using uniform rejection messages
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            rejection_policy: RejectionPolicy::default(),
        }
    }

    pub fn with_rejection_policy(mut self, rejection_policy: RejectionPolicy) -> Self {
        self.rejection_policy = rejection_policy;
        self
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
            .await
            .map_err(|e| UserError::TaskFailed(e.to_string()))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: Password, hash: String) -> Result<bool, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.verify_password(password.as_str(), &hash))
            .await
            .map_err(|e| UserError::TaskFailed(e.to_string()))?
            .map_err(UserError::from)
    }

    async fn try_register(&self, command: RegisterCommand) -> Result<AuthResult, UserError> {
        let RegisterCommand {
            name,
            email,
            password,
        } = command;

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "Registration refused: email already registered");
            return Ok(AuthResult::conflict());
        }

        let password_hash = self.hash_password(password).await?;

        let user = User {
            id: UserId::new(),
            name,
            email,
            password_hash,
            created_at: Utc::now(),
        };

        // Issued before the insert so a signing failure leaves no record behind.
        let token = self.authenticator.issue_token(&user.id.to_string())?;

        // The lookup above is advisory; the store decides under concurrency.
        let user = match self.repository.insert(user).await {
            Ok(user) => user,
            Err(UserError::EmailAlreadyExists(email)) => {
                tracing::info!(email = %email, "Registration refused: email claimed concurrently");
                return Ok(AuthResult::conflict());
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResult::Success {
            user_id: user.id,
            token,
        })
    }

    async fn try_login(&self, command: LoginCommand) -> Result<AuthResult, UserError> {
        let LoginCommand { email, password } = command;

        let Some(user) = self.repository.find_by_email(&email).await? else {
            tracing::info!(reason = "unknown_user", "Login rejected");
            return Ok(AuthResult::Rejected(
                self.rejection_policy.reject(RejectionReason::UnknownUser),
            ));
        };

        if !self.verify_password(password, user.password_hash).await? {
            tracing::info!(user_id = %user.id, reason = "bad_credentials", "Login rejected");
            return Ok(AuthResult::Rejected(
                self.rejection_policy.reject(RejectionReason::BadCredentials),
            ));
        }

        let token = self.authenticator.issue_token(&user.id.to_string())?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResult::Success {
            user_id: user.id,
            token,
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> AuthResult {
        self.try_register(command).await.unwrap_or_else(|e| {
            tracing::error!(operation = "register", error = %e, "Registration failed");
            AuthResult::SystemError
        })
    }

    async fn login(&self, command: LoginCommand) -> AuthResult {
        self.try_login(command).await.unwrap_or_else(|e| {
            tracing::error!(operation = "login", error = %e, "Login failed");
            AuthResult::SystemError
        })
    }

    async fn verify(&self, token: &str) -> Result<UserId, auth::TokenError> {
        let claims = self.authenticator.validate_token(token)?;

        UserId::from_string(&claims.sub).map_err(|e| auth::TokenError::Malformed(e.to_string()))
    }
}
