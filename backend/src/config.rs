//! Configuration management for Stocky
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with STOCKY_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Movement journal view sizes
    pub movements: MovementsConfig,

    /// Administrator account ensured at startup
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,

    /// Insert sample categories, products and movements into an empty database
    pub seed_sample_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Token lifetime in seconds
    pub token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MovementsConfig {
    /// Entries returned by the recent view
    pub recent_limit: usize,

    /// Entries returned by the top-selling ranking
    pub top_selling_limit: usize,

    /// Days covered by the movement trend chart
    pub trend_window_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub username: String,

    pub email: String,

    /// No admin account is created unless a password is configured
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCKY_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.run_migrations", true)?
            .set_default("database.seed_sample_data", false)?
            .set_default("jwt.token_expiry", 7200)?
            .set_default("movements.recent_limit", 10)?
            .set_default("movements.top_selling_limit", 5)?
            .set_default("movements.trend_window_days", 7)?
            .set_default("admin.username", "admin")?
            .set_default("admin.email", "admin@stocky.local")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCKY_ prefix)
            .add_source(
                Environment::with_prefix("STOCKY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for MovementsConfig {
    fn default() -> Self {
        Self {
            recent_limit: shared::DEFAULT_RECENT_LIMIT,
            top_selling_limit: 5,
            trend_window_days: 7,
        }
    }
}
