//! Repositories
//!
//! One repository per entity kind. Each owns a single [`Connection`], runs
//! every operation in its own transaction, and converts storage faults into
//! the closed code sets of [`crate::error`]. Nothing sqlx-specific escapes
//! except as an attached cause.
//!
//! Traits sit at the boundary so services (and tests) can substitute their
//! own stores.
//!
//! [`Connection`]: crate::Connection

mod directory;
mod entry;
mod file;

pub use directory::DirectoryRepository;
pub use entry::EntryRepository;
pub use file::FileRepository;

use crate::{
    error::{CreateErrorCode, DeleteErrorCode, GetErrorCode, RepoError},
    fault::{self, Fault},
    models::{DirectoryEntity, FileEntity, FileSystemEntryEntity},
};
use async_trait::async_trait;
use std::fmt;

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn create_directory(
        &self,
        parent_id: i64,
        name: &str,
    ) -> Result<DirectoryEntity, RepoError<CreateErrorCode>>;

    /// Returns the deleted id. The root directory reports `EntityNotFound`.
    async fn delete_directory(&self, directory_id: i64) -> Result<i64, RepoError<DeleteErrorCode>>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn create_file(
        &self,
        parent_id: i64,
        name: &str,
    ) -> Result<FileEntity, RepoError<CreateErrorCode>>;

    async fn search_files(
        &self,
        root_id: i64,
        name_prefix: &str,
        max_count: i64,
    ) -> Result<Vec<FileEntity>, RepoError<GetErrorCode>>;

    async fn delete_file(&self, file_id: i64) -> Result<i64, RepoError<DeleteErrorCode>>;
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn list_children(
        &self,
        parent_id: i64,
    ) -> Result<Vec<FileSystemEntryEntity>, RepoError<GetErrorCode>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Directory,
    File,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Directory => f.write_str("directory"),
            EntityKind::File => f.write_str("file"),
        }
    }
}

/// Classify a failed insert.
pub(crate) fn create_error(
    kind: EntityKind,
    parent_id: i64,
    name: Option<&str>,
    err: sqlx::Error,
) -> RepoError<CreateErrorCode> {
    let name = name.unwrap_or("<null>");
    let fault = fault::classify(&err);

    let error = match fault {
        Fault::ForeignKey => RepoError::new(
            CreateErrorCode::ParentNotFound,
            format!(
                "Attempted to create a {kind} with a non-existent parent directory. \
                 Parent directory id: '{parent_id}'"
            ),
        ),
        Fault::Unique => RepoError::new(
            CreateErrorCode::Duplicate,
            format!(
                "Attempted to create a duplicate {kind}. \
                 Parent directory id: '{parent_id}'; Name: '{name}'"
            ),
        ),
        Fault::Invalid => RepoError::new(
            CreateErrorCode::Invalid,
            format!("Attempted to create a {kind} with an invalid name. Name: '{name}'"),
        ),
        Fault::Busy => RepoError::new(
            CreateErrorCode::UnknownError,
            format!("The database stayed busy while creating a {kind}"),
        ),
        Fault::Other => RepoError::new(
            CreateErrorCode::UnknownError,
            format!("An unexpected error occurred while creating a {kind}"),
        ),
    };

    log_fault(fault, &err, error.description());
    error.with_cause(err)
}

/// Classify a failed delete statement (not a row-count mismatch).
pub(crate) fn delete_error(kind: EntityKind, err: sqlx::Error) -> RepoError<DeleteErrorCode> {
    unknown_error(DeleteErrorCode::UnknownError, &format!("deleting a {kind}"), err)
}

/// Classify a failed read.
pub(crate) fn get_error(what: &str, err: sqlx::Error) -> RepoError<GetErrorCode> {
    unknown_error(GetErrorCode::UnknownError, what, err)
}

fn unknown_error<C: Copy>(code: C, what: &str, err: sqlx::Error) -> RepoError<C> {
    let fault = fault::classify(&err);
    let description = if fault == Fault::Busy {
        format!("The database stayed busy while {what}")
    } else {
        format!("An unexpected error occurred while {what}")
    };

    log_fault(fault, &err, &description);
    RepoError::new(code, description).with_cause(err)
}

fn log_fault(fault: Fault, err: &sqlx::Error, description: &str) {
    match fault {
        Fault::ForeignKey | Fault::Unique | Fault::Invalid => {
            tracing::warn!(?fault, error = %err, "{description}")
        }
        Fault::Busy | Fault::Other => tracing::error!(?fault, error = %err, "{description}"),
    }
}
