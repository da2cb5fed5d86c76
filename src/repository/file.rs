use super::{create_error, delete_error, get_error, EntityKind, FileStore};
use crate::{
    commands::{delete, insert, search},
    connection::{self, Connection},
    error::{CreateErrorCode, DeleteErrorCode, GetErrorCode, RepoError, Result},
    models::FileEntity,
    StoreConfig,
};
use async_trait::async_trait;

/// File persistence and subtree search
pub struct FileRepository {
    conn: Connection,
}

impl FileRepository {
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Connection::open(config).await?))
    }

    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create a file under `parent_id`. A `None` name is stored as NULL and
    /// rejected as `Invalid`.
    #[tracing::instrument(skip(self))]
    pub async fn create_file_named(
        &self,
        parent_id: i64,
        name: Option<&str>,
    ) -> std::result::Result<FileEntity, RepoError<CreateErrorCode>> {
        let file_id = self
            .conn
            .with_retry("create_file", || self.try_create(parent_id, name))
            .await
            .map_err(|err| create_error(EntityKind::File, parent_id, name, err))?;

        tracing::debug!(file_id, "created file");
        Ok(FileEntity {
            id: file_id,
            parent_id,
            name: name.unwrap_or_default().to_owned(),
        })
    }

    /// Files anywhere under `root_id` whose name starts with `name_prefix`.
    ///
    /// The prefix is matched literally and case-sensitively; an empty prefix
    /// matches everything. At most `max_count` files come back (none when it
    /// is zero or negative), in no particular order. An unknown root yields
    /// an empty list.
    #[tracing::instrument(skip(self))]
    pub async fn search_files(
        &self,
        root_id: i64,
        name_prefix: &str,
        max_count: i64,
    ) -> std::result::Result<Vec<FileEntity>, RepoError<GetErrorCode>> {
        let files = self
            .conn
            .with_retry("search_files", || self.try_search(root_id, name_prefix, max_count))
            .await
            .map_err(|err| get_error("searching for files", err))?;

        tracing::debug!(found = files.len(), "searched subtree");
        Ok(files)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_file(
        &self,
        file_id: i64,
    ) -> std::result::Result<i64, RepoError<DeleteErrorCode>> {
        let rows_affected = self
            .conn
            .with_retry("delete_file", || self.try_delete(file_id))
            .await
            .map_err(|err| delete_error(EntityKind::File, err))?;

        match rows_affected {
            1 => {
                tracing::debug!("deleted file");
                Ok(file_id)
            }
            0 => Err(RepoError::new(
                DeleteErrorCode::EntityNotFound,
                format!("Attempted to delete a non-existent file. File id: '{file_id}'"),
            )),
            n => {
                tracing::error!(rows_affected = n, "file id matched more than one row");
                Err(RepoError::new(
                    DeleteErrorCode::MultipleMatches,
                    format!("Multiple files match the provided id. File id: '{file_id}'"),
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
        match insert::insert_file(&mut tx, parent_id, name).await {
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

    async fn try_search(
        &self,
        root_id: i64,
        name_prefix: &str,
        max_count: i64,
    ) -> std::result::Result<Vec<FileEntity>, sqlx::Error> {
        let mut tx = self.conn.begin().await?;
        match search::search_files_in_subtree(&mut tx, root_id, name_prefix, max_count).await {
            Ok(files) => {
                tx.commit().await?;
                Ok(files)
            }
            Err(err) => {
                connection::rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn try_delete(&self, file_id: i64) -> std::result::Result<u64, sqlx::Error> {
        let mut tx = self.conn.begin().await?;
        match delete::delete_file(&mut tx, file_id).await {
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
impl FileStore for FileRepository {
    async fn create_file(
        &self,
        parent_id: i64,
        name: &str,
    ) -> std::result::Result<FileEntity, RepoError<CreateErrorCode>> {
        self.create_file_named(parent_id, Some(name)).await
    }

    async fn search_files(
        &self,
        root_id: i64,
        name_prefix: &str,
        max_count: i64,
    ) -> std::result::Result<Vec<FileEntity>, RepoError<GetErrorCode>> {
        FileRepository::search_files(self, root_id, name_prefix, max_count).await
    }

    async fn delete_file(
        &self,
        file_id: i64,
    ) -> std::result::Result<i64, RepoError<DeleteErrorCode>> {
        FileRepository::delete_file(self, file_id).await
    }
}
