//! Schema bootstrap
//!
//! Creates both tables and their indexes, then inserts the sentinel root
//! directory if the directory table is empty. Safe to run on every start.

use crate::{
    connection::{self, Connection},
    error::Result,
    schema::{ROOT_DIRECTORY_ID, ROOT_DIRECTORY_NAME, SCHEMA},
    StoreError,
};

const PROBE_ANY_DIRECTORY: &str = "SELECT directory_id FROM directory LIMIT 1";

const INSERT_ROOT_DIRECTORY: &str = "
INSERT INTO directory (directory_id, parent_directory_id, directory_name)
VALUES (?1, NULL, ?2)
";

/// Bring the store behind `conn` up to date and make sure the root exists.
pub async fn initialize(conn: &Connection) -> Result<()> {
    let mut tx = conn.begin().await.map_err(|e| {
        StoreError::Migration(format!("Failed to begin bootstrap transaction: {}", e))
    })?;

    // SQLx doesn't execute multiple statements at once with a bound query,
    // so run the script one statement at a time.
    for (idx, statement) in statements(SCHEMA).enumerate() {
        if let Err(e) = sqlx::query(&statement).execute(&mut *tx).await {
            connection::rollback(tx).await;
            return Err(StoreError::Migration(format!(
                "Failed to execute migration statement #{}: {} - Error: {}",
                idx, statement, e
            )));
        }
    }

    let existing = match sqlx::query(PROBE_ANY_DIRECTORY).fetch_optional(&mut *tx).await {
        Ok(row) => row,
        Err(e) => {
            connection::rollback(tx).await;
            return Err(e.into());
        }
    };

    if existing.is_none() {
        let inserted = sqlx::query(INSERT_ROOT_DIRECTORY)
            .bind(ROOT_DIRECTORY_ID)
            .bind(ROOT_DIRECTORY_NAME)
            .execute(&mut *tx)
            .await;
        if let Err(e) = inserted {
            connection::rollback(tx).await;
            return Err(e.into());
        }
        tracing::info!(root_id = ROOT_DIRECTORY_ID, "inserted root directory");
    }

    tx.commit().await?;
    tracing::debug!("schema bootstrap complete");
    Ok(())
}

/// Split a SQL script into statements, dropping comment lines and blanks.
fn statements(sql: &str) -> impl Iterator<Item = String> + '_ {
    sql.split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| {
                    let trimmed = line.trim();
                    !trimmed.is_empty() && !trimmed.starts_with("--")
                })
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use sqlx::Row;

    #[test]
    fn test_schema_splits_into_four_statements() {
        let statements: Vec<_> = statements(SCHEMA).collect();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS directory"));
        assert!(statements.iter().all(|s| !s.contains("--")));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(&StoreConfig::on_disk(dir.path())).await.unwrap();

        initialize(&conn).await.unwrap();
        initialize(&conn).await.unwrap();

        let mut tx = conn.begin().await.unwrap();
        let rows = sqlx::query(
            "SELECT directory_id, parent_directory_id, directory_name FROM directory",
        )
            .fetch_all(&mut *tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(rows.len(), 1);
        let id: i64 = rows[0].try_get(0).unwrap();
        let parent: Option<i64> = rows[0].try_get(1).unwrap();
        let name: String = rows[0].try_get(2).unwrap();
        assert_eq!(id, ROOT_DIRECTORY_ID);
        assert_eq!(parent, None);
        assert_eq!(name, ROOT_DIRECTORY_NAME);
    }
}
