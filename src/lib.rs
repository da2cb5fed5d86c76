//! # TreeSQL - SQLite persistence for a directory/file tree
//!
//! TreeSQL stores a two-kind hierarchy, directories and files, in SQLite and
//! answers three kinds of questions about it:
//!
//! - **Point mutation**: create or delete a single directory or file
//! - **Listing**: the direct children of a directory
//! - **Subtree search**: files anywhere beneath a directory, by name prefix
//!
//! Every repository operation runs in its own transaction and reports
//! failures as a [`RepoError`] carrying a closed, operation-specific code.
//! Deleting a directory removes its whole subtree. The root directory
//! (id [`ROOT_DIRECTORY_ID`]) is created at bootstrap and cannot be deleted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use treesql::{bootstrap, Connection, DirectoryRepository, FileRepository, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::on_disk("./data");
//!     bootstrap::initialize(&Connection::open(&config).await?).await?;
//!
//!     let directories = DirectoryRepository::open(&config).await?;
//!     let files = FileRepository::open(&config).await?;
//!
//!     let docs = directories.create_directory_named(0, Some("docs")).await?;
//!     files.create_file_named(docs.id, Some("readme.md")).await?;
//!
//!     let found = files.search_files(0, "read", 100).await?;
//!     assert_eq!(found.len(), 1);
//!
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
mod commands;
pub mod config;
pub mod connection;
pub mod error;
mod fault;
pub mod models;
pub mod repository;
pub mod schema;
pub mod service;

pub use config::{RetryPolicy, StoreConfig};
pub use connection::Connection;
pub use error::{CreateErrorCode, DeleteErrorCode, GetErrorCode, RepoError, Result, StoreError};
pub use models::{DirectoryEntity, FileEntity, FileSystemEntryEntity};
pub use repository::{
    DirectoryRepository, DirectoryStore, EntryRepository, EntryStore, FileRepository, FileStore,
};
pub use schema::ROOT_DIRECTORY_ID;
