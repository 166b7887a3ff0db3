//! Drink persistence on top of a SQLite pool.
//!
//! Recipes are stored as JSON text next to the title. Ids come from an
//! `AUTOINCREMENT` key and are never handed out twice, so a deleted drink
//! stays deleted.

use crate::config::DatabaseConfig;
use crate::errors::ApiError;
use crate::models::{Drink, Ingredient};
use log::{debug, error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const CREATE_DRINKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drinks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE,
        recipe TEXT NOT NULL
    )
"#;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to serialize recipe: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Stored recipe of drink {id} is invalid: {source}")]
    CorruptRecipe {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
    #[error("A drink titled '{0}' already exists")]
    DuplicateTitle(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateTitle(title) => {
                ApiError::unprocessable(format!("A drink titled '{title}' already exists"))
            }
            err => {
                error!("Drink store failure: {err}");
                ApiError::internal("Internal server error")
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = StoreError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe = serde_json::from_str(&row.recipe)
            .map_err(|source| StoreError::CorruptRecipe { id: row.id, source })?;
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe,
        })
    }
}

/// A drink that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Fields to change on a stored drink, `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrinkUpdate {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

#[derive(Clone)]
pub struct DrinkStore {
    pool: SqlitePool,
}

impl DrinkStore {
    /// Connect to the configured database and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool_options = if config.is_in_memory() {
            // Every connection to an in-memory database sees its own database,
            // keep exactly one alive for the lifetime of the pool
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        if config.reset_on_startup {
            store.reset().await?;
        }
        Ok(store)
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_DRINKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Drop all drinks and start from a fresh table holding a single sample drink
    pub async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE IF EXISTS drinks")
            .execute(&self.pool)
            .await?;
        self.create_schema().await?;

        let sample = self
            .insert(NewDrink {
                title: "water".to_string(),
                recipe: vec![Ingredient {
                    color: "blue".to_string(),
                    name: "water".to_string(),
                    parts: 1,
                }],
            })
            .await?;
        info!("Database reset, seeded sample drink {}", sample.id);
        Ok(())
    }

    /// All drinks ordered by id
    pub async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Drink::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<Drink>, StoreError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Drink::try_from).transpose()
    }

    pub async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let recipe = serde_json::to_string(&drink.recipe)?;
        let result = sqlx::query("INSERT INTO drinks (title, recipe) VALUES (?, ?)")
            .bind(&drink.title)
            .bind(&recipe)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_title_violation(e, &drink.title))?;

        let id = result.last_insert_rowid();
        debug!("Inserted drink {} '{}'", id, drink.title);
        Ok(Drink {
            id,
            title: drink.title,
            recipe: drink.recipe,
        })
    }

    /// Apply `update` to the drink `id`, returning `None` when it does not exist
    pub async fn update(&self, id: i64, update: DrinkUpdate) -> Result<Option<Drink>, StoreError> {
        let Some(mut drink) = self.get(id).await? else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            drink.title = title;
        }
        if let Some(recipe) = update.recipe {
            drink.recipe = recipe;
        }

        let recipe = serde_json::to_string(&drink.recipe)?;
        let result = sqlx::query("UPDATE drinks SET title = ?, recipe = ? WHERE id = ?")
            .bind(&drink.title)
            .bind(&recipe)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_title_violation(e, &drink.title))?;

        if result.rows_affected() == 0 {
            // Deleted between the read and the write
            return Ok(None);
        }
        debug!("Updated drink {id}");
        Ok(Some(drink))
    }

    /// Delete the drink `id`, returning whether it existed
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks that the database answers queries
    pub async fn health_check(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| format!("Database health check failed: {e}"))
    }
}

fn unique_title_violation(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateTitle(title.to_string())
        }
        _ => StoreError::Database(err),
    }
}
