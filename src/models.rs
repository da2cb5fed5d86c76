//! Repository records

use serde::{Deserialize, Serialize};

/// A persisted directory row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntity {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
}

/// A persisted file row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntity {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
}

/// One direct child of a directory, either a directory or a file.
///
/// Directory ids and file ids come from separate sequences, so two entries
/// under the same parent can share `id`; `is_directory` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileSystemEntryEntity {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
    pub is_directory: bool,
}
