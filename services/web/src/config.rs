//! Web front-end configuration
//!
//! Defaults, then an optional `config/web.toml`, then `WEB__*` environment
//! variables (e.g. `WEB__GRAPHQL__ENDPOINT`, `WEB__SESSION__SECRET`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_SESSION_SECRET: &str = "customer-hub-development-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Backend GraphQL API connection
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlConfig {
    pub endpoint: String,
    /// Skip TLS certificate validation, for self-signed development setups
    pub accept_invalid_certs: bool,
}

/// Session cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// HMAC key signing the session cookie
    pub secret: String,
    pub lifetime_hours: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    pub server: ServerConfig,
    pub graphql: GraphQlConfig,
    pub session: SessionConfig,
}

impl WebConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("graphql.endpoint", "http://localhost:3001/graphql")?
            .set_default("graphql.accept_invalid_certs", false)?
            .set_default("session.secret", DEFAULT_SESSION_SECRET)?
            .set_default("session.lifetime_hours", 8)?
            .set_default("session.secure_cookie", false)?
            .add_source(File::with_name("config/web").required(false))
            .add_source(Environment::with_prefix("WEB").separator("__"))
            .build()?;

        s.try_deserialize()
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
        let config = WebConfig::load().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.graphql.endpoint, "http://localhost:3001/graphql");
        assert!(!config.graphql.accept_invalid_certs);
        assert_eq!(config.session.lifetime_hours, 8);
        assert_eq!(config.session.secret, DEFAULT_SESSION_SECRET);
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        unsafe {
            std::env::set_var("WEB__GRAPHQL__ENDPOINT", "https://api.internal/graphql");
            std::env::set_var("WEB__SESSION__LIFETIME_HOURS", "2");
        }

        let config = WebConfig::load().unwrap();
        assert_eq!(config.graphql.endpoint, "https://api.internal/graphql");
        assert_eq!(config.session.lifetime_hours, 2);

        unsafe {
            std::env::remove_var("WEB__GRAPHQL__ENDPOINT");
            std::env::remove_var("WEB__SESSION__LIFETIME_HOURS");
        }
    }
}
