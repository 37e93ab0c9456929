#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordPolicy;
use auth::SigningKey;
use auth_service::domain::user::models::RejectionPolicy;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Authenticator with a cheap hashing policy so tests stay fast.
pub fn test_authenticator() -> Arc<Authenticator> {
    let key = SigningKey::new(TEST_SECRET).expect("Failed to build signing key");
    Arc::new(
        Authenticator::new(&key)
            .with_password_policy(PasswordPolicy::new(1024, 1, 1).expect("valid policy")),
    )
}

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_policy(RejectionPolicy::Uniform).await
    }

    pub async fn spawn_with_policy(rejection_policy: RejectionPolicy) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator = test_authenticator();
        let auth_service = AuthService::new(Arc::clone(&repository), Arc::clone(&authenticator))
            .with_rejection_policy(rejection_policy);

        let router = create_router(Arc::new(auth_service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
