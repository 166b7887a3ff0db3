use crate::auth::jwks::KeyResolverError;
use crate::auth::AuthGate;
use crate::config::Settings;
use crate::store::{DrinkStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building the application state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to open the drinks database: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to set up token validation: {0}")]
    Auth(#[from] KeyResolverError),
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<DrinkStore>,
    pub auth: Arc<AuthGate>,
}

impl AppState {
    pub async fn new(settings: Settings) -> Result<Self, StateError> {
        let auth = AuthGate::new(&settings.auth)?;
        let store = DrinkStore::connect(&settings.database).await?;

        Ok(Self {
            settings: Arc::new(settings),
            store: Arc::new(store),
            auth: Arc::new(auth),
        })
    }

    /// Check if all components are healthy
    pub async fn health_check(&self) -> Result<(), String> {
        self.store.health_check().await
    }
}
