//! Configuration module with business-specific sub-modules
//!
//! Configuration is built once at process start and passed by reference to
//! the services that need it; nothing below this module reads environment
//! variables ad hoc.
//!
//! - `credentials` - External LLM provider key pools and probe settings
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Request budget configuration
//! - `verification` - Verification session configuration

pub mod credentials;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use credentials::{CredentialPoolConfig, CredentialsConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Verification session configuration
    pub verification: VerificationConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// External credential pool configuration
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/dha_dev"),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::development(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::new("mysql://prod-db:3306/dha").with_max_connections(50),
            verification: VerificationConfig::default(),
            rate_limit: RateLimitConfig::production(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Selects the base profile from `ENVIRONMENT` and then overlays the
    /// pieces that must come from the process environment (database URL,
    /// credential pools).
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database = DatabaseConfig::new(url);
        }
        config.credentials = CredentialsConfig::from_env();
        config
    }
}
