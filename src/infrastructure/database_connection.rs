//! SQLite connection handling via sqlx.

use std::path::Path;

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::domain::constants::store;

/// Process-scoped database handle, opened once per run and released at exit.
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Opens `data.sqlite` in the working directory, creating it if missing.
    pub async fn open_default() -> Result<Self> {
        Self::new(store::DEFAULT_DATABASE_URL).await
    }

    pub async fn new(database_url: &str) -> Result<Self> {
        let db_path = database_url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");

        // sqlx's sqlite driver refuses to open a nonexistent file by default.
        if !db_path.is_empty() && !Path::new(db_path).exists() {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::File::create(db_path)?;
        }

        // The run is fully sequential; one connection is all it ever uses.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
