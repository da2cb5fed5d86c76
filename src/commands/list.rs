use crate::models::FileSystemEntryEntity;
use sqlx::{Row, SqliteConnection};

const LIST_CHILDREN: &str = "
SELECT directory_id AS entry_id, directory_name AS entry_name, 1 AS is_directory
FROM directory
WHERE parent_directory_id = ?1

UNION ALL

SELECT file_id AS entry_id, file_name AS entry_name, 0 AS is_directory
FROM file
WHERE parent_directory_id = ?1
";

/// Direct child directories and files of `parent_id`. One level only.
pub(crate) async fn list_children(
    conn: &mut SqliteConnection,
    parent_id: i64,
) -> Result<Vec<FileSystemEntryEntity>, sqlx::Error> {
    let rows = sqlx::query(LIST_CHILDREN)
        .bind(parent_id)
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter()
        .map(|row| {
            let is_directory: i64 = row.try_get("is_directory")?;
            Ok::<_, sqlx::Error>(FileSystemEntryEntity {
                id: row.try_get("entry_id")?,
                parent_id,
                name: row.try_get("entry_name")?,
                is_directory: is_directory != 0,
            })
        })
        .collect()
}
