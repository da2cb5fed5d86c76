//! Explicitly owned SQLite connection
//!
//! Each repository owns exactly one [`Connection`]: a sqlx pool capped at a
//! single connection, opened by [`Connection::open`] and released by
//! [`Connection::close`] (or on drop).

use crate::{
    config::{RetryPolicy, StoreConfig},
    error::Result,
    fault::{self, Fault},
    StoreError,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    Sqlite, Transaction,
};
use std::future::Future;

pub struct Connection {
    pool: SqlitePool,
    retry: RetryPolicy,
}

impl Connection {
    /// Open the database described by `config`, creating the file if needed.
    ///
    /// Foreign keys are enforced on the connection; cascading deletes depend
    /// on it.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::debug!(path = %config.path.display(), "opened sqlite connection");

        Ok(Self {
            pool,
            retry: config.retry.clone(),
        })
    }

    pub(crate) async fn begin(
        &self,
    ) -> std::result::Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run `operation`, re-running it with backoff while it fails busy.
    pub(crate) async fn with_retry<T, F, Fut>(
        &self,
        operation: &'static str,
        mut op: F,
    ) -> std::result::Result<T, sqlx::Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let mut backoff = self.retry.initial_backoff();
        let mut attempt = 1;

        loop {
            match op().await {
                Err(err)
                    if attempt < self.retry.max_attempts && fault::classify(&err) == Fault::Busy =>
                {
                    tracing::warn!(
                        operation,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "database busy, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(self.retry.max_backoff());
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// Roll back `tx`, logging rather than surfacing a failed rollback.
pub(crate) async fn rollback(tx: Transaction<'static, Sqlite>) {
    if let Err(err) = tx.rollback().await {
        tracing::error!(error = %err, "failed to roll back transaction");
    }
}
