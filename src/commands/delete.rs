use sqlx::SqliteConnection;

// The root is the only directory without a parent; filtering on the parent
// column makes it undeletable by id.
const DELETE_DIRECTORY: &str =
    "DELETE FROM directory WHERE directory_id = ?1 AND parent_directory_id IS NOT NULL";

const DELETE_FILE: &str = "DELETE FROM file WHERE file_id = ?1";

/// Delete one directory. Descendant directories and files go with it
/// through `ON DELETE CASCADE`. Returns the number of rows matched.
pub(crate) async fn delete_directory(
    conn: &mut SqliteConnection,
    directory_id: i64,
) -> Result<u64, sqlx::Error> {
    delete_by_id(conn, DELETE_DIRECTORY, directory_id).await
}

/// Delete one file. Returns the number of rows matched.
pub(crate) async fn delete_file(
    conn: &mut SqliteConnection,
    file_id: i64,
) -> Result<u64, sqlx::Error> {
    delete_by_id(conn, DELETE_FILE, file_id).await
}

async fn delete_by_id(
    conn: &mut SqliteConnection,
    sql: &'static str,
    id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(sql).bind(id).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{insert, list, testing::scratch_store},
        schema::ROOT_DIRECTORY_ID,
    };

    #[tokio::test]
    async fn test_root_is_never_deleted() {
        let (_dir, conn) = scratch_store().await;
        let mut tx = conn.begin().await.unwrap();

        assert_eq!(delete_directory(&mut tx, ROOT_DIRECTORY_ID).await.unwrap(), 0);
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_directory_delete_cascades() {
        let (_dir, conn) = scratch_store().await;
        let mut tx = conn.begin().await.unwrap();

        let top = insert::insert_directory(&mut tx, ROOT_DIRECTORY_ID, Some("top")).await.unwrap();
        let mid = insert::insert_directory(&mut tx, top, Some("mid")).await.unwrap();
        let leaf = insert::insert_file(&mut tx, mid, Some("leaf.txt")).await.unwrap();

        assert_eq!(delete_directory(&mut tx, top).await.unwrap(), 1);

        assert!(list::list_children(&mut tx, top).await.unwrap().is_empty());
        assert!(list::list_children(&mut tx, mid).await.unwrap().is_empty());
        assert_eq!(delete_file(&mut tx, leaf).await.unwrap(), 0);
        tx.commit().await.unwrap();
    }
}
