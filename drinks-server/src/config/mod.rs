pub(crate) use crate::config::auth::AuthConfig;
pub(crate) use crate::config::database::DatabaseConfig;
use confique::Config;

pub mod auth;
pub mod database;

/// Optional configuration file, environment variables take precedence over it
pub const CONFIG_FILE: &str = "drinks.toml";

/// Main configuration structure for the drinks server
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the drinks server will listen to (default: 5000)
    #[config(env = "DRINKS_PORT", default = 5000)]
    pub port: u16,

    /// Serve `GET /drinks` without requiring a token (default: false)
    #[config(env = "DRINKS_PUBLIC_MENU", default = false)]
    pub public_menu: bool,

    /// Token validation configuration
    #[config(nested)]
    pub auth: AuthConfig,

    /// Database configuration
    #[config(nested)]
    pub database: DatabaseConfig,
}

impl Settings {
    /// Loads the configuration from environment variables and the optional config file
    pub fn new() -> Result<Self, confique::Error> {
        Self::builder().env().file(CONFIG_FILE).load()
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(jwks_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            public_menu: false,
            auth: AuthConfig {
                domain: jwks_mock.uri(),
                audience: crate::test_utils::TEST_AUDIENCE.to_string(),
                algorithms: "RS256".to_string(),
                leeway: 0,
                jwks_timeout: 2,
                jwks_cache_ttl: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                reset_on_startup: false,
            },
        }
    }
}
