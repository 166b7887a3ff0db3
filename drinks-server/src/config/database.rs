use confique::Config;

/// Configuration for the drinks database
#[derive(Debug, Config, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string (default: sqlite://database.db)
    #[config(env = "DRINKS_DATABASE_URL", default = "sqlite://database.db")]
    pub url: String,

    /// Maximum number of pooled connections (default: 5)
    #[config(env = "DRINKS_DATABASE_MAX_CONNECTIONS", default = 5)]
    pub max_connections: u32,

    /// Drop and recreate the drinks table on startup (default: false).
    /// This deletes every stored drink.
    #[config(env = "DRINKS_DATABASE_RESET_ON_STARTUP", default = false)]
    pub reset_on_startup: bool,
}

impl DatabaseConfig {
    /// In-memory databases live inside a single connection
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
