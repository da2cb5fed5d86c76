use super::{create_error, delete_error, DirectoryStore, EntityKind};
use crate::{
    commands::{delete, insert},
    connection::{self, Connection},
    error::{CreateErrorCode, DeleteErrorCode, RepoError, Result},
    models::DirectoryEntity,
    StoreConfig,
};
use async_trait::async_trait;

/// Directory persistence
pub struct DirectoryRepository {
    conn: Connection,
}

impl DirectoryRepository {
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Connection::open(config).await?))
    }

    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create a directory under `parent_id`. A `None` name is stored as NULL
    /// and rejected as `Invalid`.
    #[tracing::instrument(skip(self))]
    pub async fn create_directory_named(
        &self,
        parent_id: i64,
        name: Option<&str>,
    ) -> std::result::Result<DirectoryEntity, RepoError<CreateErrorCode>> {
        let directory_id = self
            .conn
            .with_retry("create_directory", || self.try_create(parent_id, name))
            .await
            .map_err(|err| create_error(EntityKind::Directory, parent_id, name, err))?;

        tracing::debug!(directory_id, "created directory");
        Ok(DirectoryEntity {
            id: directory_id,
            parent_id,
            name: name.unwrap_or_default().to_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_directory(
        &self,
        directory_id: i64,
    ) -> std::result::Result<i64, RepoError<DeleteErrorCode>> {
        let rows_affected = self
            .conn
            .with_retry("delete_directory", || self.try_delete(directory_id))
            .await
            .map_err(|err| delete_error(EntityKind::Directory, err))?;

        match rows_affected {
            1 => {
                tracing::debug!("deleted directory");
                Ok(directory_id)
            }
            0 => Err(RepoError::new(
                DeleteErrorCode::EntityNotFound,
                format!(
                    "Attempted to delete a non-existent directory. \
                     Directory id: '{directory_id}'"
                ),
            )),
            n => {
                tracing::error!(rows_affected = n, "directory id matched more than one row");
                Err(RepoError::new(
                    DeleteErrorCode::UnknownError,
                    format!(
                        "Multiple directories match the provided id. \
                         Directory id: '{directory_id}'"
                    ),
                ))
            }
        }
    }

    pub async fn close(&self) {
        self.conn.close().await;
    }

    async fn try_create(
        &self,
        parent_id: i64,
        name: Option<&str>,
    ) -> std::result::Result<i64, sqlx::Error> {
        let mut tx = self.conn.begin().await?;
        match insert::insert_directory(&mut tx, parent_id, name).await {
            Ok(id) => {
                tx.commit().await?;
                Ok(id)
            }
            Err(err) => {
                connection::rollback(tx).await;
                Err(err)
            }
        }
    }

    /// Commits only when exactly one row went away.
    async fn try_delete(&self, directory_id: i64) -> std::result::Result<u64, sqlx::Error> {
        let mut tx = self.conn.begin().await?;
        match delete::delete_directory(&mut tx, directory_id).await {
            Ok(1) => {
                tx.commit().await?;
                Ok(1)
            }
            Ok(n) => {
                connection::rollback(tx).await;
                Ok(n)
            }
            Err(err) => {
                connection::rollback(tx).await;
                Err(err)
            }
        }
    }
}

#[async_trait]
impl DirectoryStore for DirectoryRepository {
    async fn create_directory(
        &self,
        parent_id: i64,
        name: &str,
    ) -> std::result::Result<DirectoryEntity, RepoError<CreateErrorCode>> {
        self.create_directory_named(parent_id, Some(name)).await
    }

    async fn delete_directory(
        &self,
        directory_id: i64,
    ) -> std::result::Result<i64, RepoError<DeleteErrorCode>> {
        DirectoryRepository::delete_directory(self, directory_id).await
    }
}
