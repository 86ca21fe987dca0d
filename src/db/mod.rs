//! Database module - AppState and database operations
//!
//! This module is split into submodules for better separation of concerns:
//! - `template` - Template metadata operations
//! - `document` - Document metadata and history operations
//! - `audit` - Log and failed-generation operations

mod audit;
mod document;
mod template;

use sqlx::PgPool;
use std::env;
use std::sync::Arc;

use crate::refnum::ReferenceNumbers;
use crate::storage::{HttpObjectStore, ObjectStorage, StorageConfig};

pub struct AppState {
    pub pool: PgPool,
    pub storage: Arc<dyn ObjectStorage + Send + Sync>,
    pub ref_numbers: ReferenceNumbers,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let storage_config = StorageConfig::from_env()?;
        Self::new_with_config(storage_config).await
    }

    pub async fn new_with_config(
        storage_config: StorageConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let database_url = database_url_from_env()?;

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let http_client = reqwest::Client::builder()
            .user_agent("autodocs-server/0.3")
            .build()?;

        let storage = Arc::new(HttpObjectStore::new(storage_config, http_client));

        Ok(AppState {
            pool,
            storage,
            ref_numbers: ReferenceNumbers::new(),
        })
    }

    /// Used by tests to wire in a prepared pool and a mock object store.
    pub fn new_with_pool_and_storage(
        pool: PgPool,
        storage: Arc<dyn ObjectStorage + Send + Sync>,
    ) -> Self {
        AppState {
            pool,
            storage,
            ref_numbers: ReferenceNumbers::new(),
        }
    }
}

fn database_url_from_env() -> Result<String, env::VarError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = env::var("DB_HOST")?;
    let user = env::var("DB_USER")?;
    let password = env::var("DB_PASSWORD")?;
    let name = env::var("DB_NAME")?;
    Ok(format!(
        "postgres://{}:{}@{}:5432/{}?sslmode=disable",
        user, password, host, name
    ))
}
