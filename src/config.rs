//! Store configuration

use crate::{error::Result, schema::DATABASE_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Configuration shared by every connection a store opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. Created if missing.
    pub path: PathBuf,

    /// How long SQLite itself waits on a locked database before reporting busy
    pub busy_timeout_ms: u64,

    /// Retry policy for operations that still come back busy
    pub retry: RetryPolicy,
}

/// Bounded exponential backoff for lock contention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. `1` disables retrying.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DATABASE_FILE_NAME),
            busy_timeout_ms: 5_000,
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 25,
            max_backoff_ms: 500,
        }
    }
}

impl StoreConfig {
    /// Database file `treesql.sqlite` inside `directory`
    pub fn on_disk(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(DATABASE_FILE_NAME),
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl RetryPolicy {
    /// No retries: the first busy fault is final.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_disk_places_database_in_directory() {
        let config = StoreConfig::on_disk("/var/lib/tree");
        assert_eq!(config.path, PathBuf::from("/var/lib/tree/treesql.sqlite"));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config =
            StoreConfig::from_json(r#"{ "path": "/tmp/t.sqlite", "retry": { "max_attempts": 5 } }"#)
                .unwrap();

        assert_eq!(config.path, PathBuf::from("/tmp/t.sqlite"));
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_backoff(), Duration::from_millis(25));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(StoreConfig::from_json("{ path: ").is_err());
    }
}
