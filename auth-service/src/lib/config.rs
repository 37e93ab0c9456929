use std::env;
use std::fmt;

use auth::PasswordPolicy;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::models::RejectionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    /// Token lifetime, or `None` when `expiration_hours` is not a positive
    /// representable duration.
    pub fn token_ttl(&self) -> Option<Duration> {
        Duration::try_hours(self.expiration_hours).filter(|ttl| *ttl > Duration::zero())
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let policy = PasswordPolicy::default();
        Self {
            memory_kib: policy.memory_kib(),
            iterations: policy.iterations(),
            parallelism: policy.parallelism(),
        }
    }
}

impl PasswordConfig {
    pub fn policy(&self) -> Result<PasswordPolicy, auth::PasswordError> {
        PasswordPolicy::new(self.memory_kib, self.iterations, self.parallelism)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Surface "no such user" and "wrong password" with different messages.
    #[serde(default)]
    pub distinct_rejection_messages: bool,
}

impl AuthConfig {
    pub fn rejection_policy(&self) -> RejectionPolicy {
        if self.distinct_rejection_messages {
            RejectionPolicy::Distinct
        } else {
            RejectionPolicy::Uniform
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    auth::DEFAULT_TOKEN_TTL_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

/// Unprefixed variables, nested with `__` (`JWT__SECRET` -> `jwt.secret`).
fn environment() -> Environment {
    Environment::default().separator("__")
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = from_toml(
            r#"
            [server]
            http_port = 3000

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .expect("Failed to parse config");

        assert!(config.database.is_none());
        assert_eq!(config.jwt.expiration_hours, 10);
        assert_eq!(config.password, PasswordConfig::default());
        assert!(!config.auth.distinct_rejection_messages);
    }

    #[test]
    fn test_derived_settings() {
        let config = from_toml(
            r#"
            [server]
            http_port = 3000

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            expiration_hours = 2

            [password]
            memory_kib = 1024
            iterations = 1
            parallelism = 1

            [auth]
            distinct_rejection_messages = true
            "#,
        )
        .unwrap();

        assert_eq!(config.jwt.token_ttl(), Some(Duration::hours(2)));
        assert_eq!(config.password.policy().unwrap().memory_kib(), 1024);
        assert_eq!(config.auth.rejection_policy(), RejectionPolicy::Distinct);
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let jwt = JwtConfig {
            secret: String::new(),
            expiration_hours: 0,
        };
        assert!(jwt.token_ttl().is_none());
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = from_toml(
            r#"
            [server]
            http_port = 3000

            [jwt]
            expiration_hours = 10
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut variables = config::Map::new();
        variables.insert(
            "JWT__SECRET".to_string(),
            "secret-from-the-environment-at-least-32-bytes".to_string(),
        );
        variables.insert(
            "DATABASE__URL".to_string(),
            "postgresql://postgres:postgres@db:5432/auth".to_string(),
        );

        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [server]
                http_port = 3000

                [jwt]
                secret = ""
                "#,
                FileFormat::Toml,
            ))
            .add_source(environment().source(Some(variables)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(
            config.jwt.secret,
            "secret-from-the-environment-at-least-32-bytes"
        );
        let database = config.database.expect("database section from env");
        assert_eq!(database.url, "postgresql://postgres:postgres@db:5432/auth");
        assert_eq!(database.max_connections, 5);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = from_toml(
            r#"
            [server]
            http_port = 3000

            [jwt]
            secret = "super-secret-value-that-must-not-leak"
            "#,
        )
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
    }
}
