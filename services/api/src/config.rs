//! API service configuration
//!
//! Defaults, then an optional `config/api.toml`, then `API__*` environment
//! variables (e.g. `API__ENVIRONMENT=Test`, `API__SERVER__PORT=4000`).
//! Connection settings for PostgreSQL come from
//! [`common::database::DatabaseConfig::from_env`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Hosting environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AppEnvironment {
    Development,
    /// In-memory store, no seeding
    Test,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Use the in-memory store outside of `Test`
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub database: StoreConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("environment", "Development")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("database.in_memory", false)?
            .add_source(File::with_name("config/api").required(false))
            .add_source(Environment::with_prefix("API").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.environment == AppEnvironment::Test || self.database.in_memory
    }

    pub fn seeds_store(&self) -> bool {
        self.environment != AppEnvironment::Test
    }

    /// The GraphiQL explorer is not mounted in production
    pub fn exposes_explorer(&self) -> bool {
        self.environment != AppEnvironment::Production
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
        assert!(!config.uses_in_memory_store());
        assert!(config.seeds_store());
        assert!(config.exposes_explorer());
    }

    #[test]
    #[serial]
    fn test_test_environment_skips_seeding_and_uses_memory() {
        unsafe {
            std::env::set_var("API__ENVIRONMENT", "Test");
            std::env::set_var("API__SERVER__PORT", "4001");
        }

        let config = AppConfig::load().unwrap();
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.server.port, 4001);
        assert!(config.uses_in_memory_store());
        assert!(!config.seeds_store());

        unsafe {
            std::env::remove_var("API__ENVIRONMENT");
            std::env::remove_var("API__SERVER__PORT");
        }
    }

    #[test]
    #[serial]
    fn test_production_hides_explorer() {
        unsafe {
            std::env::set_var("API__ENVIRONMENT", "Production");
        }

        let config = AppConfig::load().unwrap();
        assert!(!config.exposes_explorer());
        assert!(config.seeds_store());

        unsafe {
            std::env::remove_var("API__ENVIRONMENT");
        }
    }
}
