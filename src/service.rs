//! Services
//!
//! Pass-through layer between repositories and an API: the same operations,
//! returning API-facing records instead of repository entities. Error codes
//! are handed through unchanged.

use crate::{
    error::{CreateErrorCode, DeleteErrorCode, GetErrorCode, RepoError},
    models::{DirectoryEntity, FileEntity, FileSystemEntryEntity},
    repository::{DirectoryStore, EntryStore, FileStore},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub directory_id: i64,
    pub parent_directory_id: i64,
    pub directory_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub file_id: i64,
    pub parent_directory_id: i64,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemEntry {
    pub file_system_entry_id: i64,
    pub parent_directory_id: i64,
    pub file_system_entry_name: String,
    pub is_directory: bool,
}

impl From<DirectoryEntity> for Directory {
    fn from(entity: DirectoryEntity) -> Self {
        Self {
            directory_id: entity.id,
            parent_directory_id: entity.parent_id,
            directory_name: entity.name,
        }
    }
}

impl From<FileEntity> for File {
    fn from(entity: FileEntity) -> Self {
        Self {
            file_id: entity.id,
            parent_directory_id: entity.parent_id,
            file_name: entity.name,
        }
    }
}

impl From<FileSystemEntryEntity> for FileSystemEntry {
    fn from(entity: FileSystemEntryEntity) -> Self {
        Self {
            file_system_entry_id: entity.id,
            parent_directory_id: entity.parent_id,
            file_system_entry_name: entity.name,
            is_directory: entity.is_directory,
        }
    }
}

pub struct DirectoryService<R> {
    repository: R,
}

impl<R: DirectoryStore> DirectoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn create_directory(
        &self,
        parent_id: i64,
        name: &str,
    ) -> Result<Directory, RepoError<CreateErrorCode>> {
        self.repository.create_directory(parent_id, name).await.map(Directory::from)
    }

    pub async fn delete_directory(
        &self,
        directory_id: i64,
    ) -> Result<i64, RepoError<DeleteErrorCode>> {
        self.repository.delete_directory(directory_id).await
    }
}

pub struct FileService<R> {
    repository: R,
}

impl<R: FileStore> FileService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn create_file(
        &self,
        parent_id: i64,
        name: &str,
    ) -> Result<File, RepoError<CreateErrorCode>> {
        self.repository.create_file(parent_id, name).await.map(File::from)
    }

    pub async fn search_files(
        &self,
        root_id: i64,
        name_prefix: &str,
        max_count: i64,
    ) -> Result<Vec<File>, RepoError<GetErrorCode>> {
        let files = self.repository.search_files(root_id, name_prefix, max_count).await?;
        Ok(files.into_iter().map(File::from).collect())
    }

    pub async fn delete_file(&self, file_id: i64) -> Result<i64, RepoError<DeleteErrorCode>> {
        self.repository.delete_file(file_id).await
    }
}

pub struct FileSystemEntryService<R> {
    repository: R,
}

impl<R: EntryStore> FileSystemEntryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn list_children(
        &self,
        parent_id: i64,
    ) -> Result<Vec<FileSystemEntry>, RepoError<GetErrorCode>> {
        let entries = self.repository.list_children(parent_id).await?;
        Ok(entries.into_iter().map(FileSystemEntry::from).collect())
    }
}
