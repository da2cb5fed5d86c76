use super::{get_error, EntryStore};
use crate::{
    commands::list,
    connection::{self, Connection},
    error::{GetErrorCode, RepoError, Result},
    models::FileSystemEntryEntity,
    StoreConfig,
};
use async_trait::async_trait;

/// Read-only view over both tables: the direct children of a directory
pub struct EntryRepository {
    conn: Connection,
}

impl EntryRepository {
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Connection::open(config).await?))
    }

    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Child directories and files of `parent_id`, never grandchildren. An
    /// unknown parent yields an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn list_children(
        &self,
        parent_id: i64,
    ) -> std::result::Result<Vec<FileSystemEntryEntity>, RepoError<GetErrorCode>> {
        let entries = self
            .conn
            .with_retry("list_children", || self.try_list(parent_id))
            .await
            .map_err(|err| get_error("listing directory entries", err))?;

        tracing::debug!(found = entries.len(), "listed children");
        Ok(entries)
    }

    pub async fn close(&self) {
        self.conn.close().await;
    }

    async fn try_list(
        &self,
        parent_id: i64,
    ) -> std::result::Result<Vec<FileSystemEntryEntity>, sqlx::Error> {
        let mut tx = self.conn.begin().await?;
        match list::list_children(&mut tx, parent_id).await {
            Ok(entries) => {
                tx.commit().await?;
                Ok(entries)
            }
            Err(err) => {
                connection::rollback(tx).await;
                Err(err)
            }
        }
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn list_children(
        &self,
        parent_id: i64,
    ) -> std::result::Result<Vec<FileSystemEntryEntity>, RepoError<GetErrorCode>> {
        EntryRepository::list_children(self, parent_id).await
    }
}
