use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

use crate::provider::{IdentityProvider, ProgressStore, Providers};

mod identity_repo;
mod mapping;
mod migrate;
mod progress_repo;

/// Local backend: accounts, sessions, and progress in one database file.
#[derive(Clone)]
pub struct SqliteProvider {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteProvider {
    /// Connect to `SQLite` using the given URL.
    ///
    /// Every pooled connection enforces foreign keys and runs the journal
    /// in WAL mode with a busy timeout, so a second writer waits instead
    /// of failing.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL does not parse or the
    /// connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration queries fail.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Providers {
    /// Build `Providers` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let provider = SqliteProvider::connect(database_url).await?;
        provider.migrate().await?;
        let identity: Arc<dyn IdentityProvider> = Arc::new(provider.clone());
        let progress: Arc<dyn ProgressStore> = Arc::new(provider);
        Ok(Self { identity, progress })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteProvider>();
    }
}
