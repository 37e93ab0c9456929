use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningKey;
use auth_service::config::Config;
use auth_service::domain::user::ports::AuthServicePort;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // Key, policy and TTL problems abort startup rather than the first request.
    let signing_key = SigningKey::new(config.jwt.secret.as_bytes())
        .context("Invalid token signing key (set JWT__SECRET)")?;
    let password_policy = config.password.policy()?;
    let token_ttl = config
        .jwt
        .token_ttl()
        .context("jwt.expiration_hours must be a positive number of hours")?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        argon2_memory_kib = password_policy.memory_kib(),
        argon2_iterations = password_policy.iterations(),
        argon2_parallelism = password_policy.parallelism(),
        distinct_rejection_messages = config.auth.distinct_rejection_messages,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(&signing_key)
            .with_password_policy(password_policy)
            .with_token_ttl(token_ttl),
    );
    let rejection_policy = config.auth.rejection_policy();

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(
                AuthService::new(user_repository, Arc::clone(&authenticator))
                    .with_rejection_policy(rejection_policy),
            )
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory only");

            let user_repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(
                AuthService::new(user_repository, Arc::clone(&authenticator))
                    .with_rejection_policy(rejection_policy),
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
