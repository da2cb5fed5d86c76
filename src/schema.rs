//! Database schema definitions for TreeSQL
//!
//! Two tables hold the namespace: `directory` and `file`. Both key rows by an
//! engine-assigned `INTEGER PRIMARY KEY`, point at their parent through
//! `parent_directory_id` (cascading on delete), and keep `(parent, name)`
//! unique. Ids are only unique within their own table.

/// DDL applied at bootstrap. Every statement is `IF NOT EXISTS`.
pub const SCHEMA: &str = include_str!("../migrations/sqlite.sql");

/// Root directory id (always 0)
pub const ROOT_DIRECTORY_ID: i64 = 0;

/// Root directory name
pub const ROOT_DIRECTORY_NAME: &str = "~";

/// File name used by [`crate::StoreConfig::on_disk`]
pub const DATABASE_FILE_NAME: &str = "treesql.sqlite";
