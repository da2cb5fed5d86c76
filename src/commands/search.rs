use crate::models::FileEntity;
use sqlx::{Row, SqliteConnection};

// `subtree` is the reflexive-transitive closure of directory ids below ?1.
// UNION (not UNION ALL) stops at the fixpoint.
//
// The prefix test compares a leading substring instead of using LIKE, so the
// match is case-sensitive and `%` / `_` in the prefix are literal.
const SEARCH_FILES_IN_SUBTREE: &str = "
WITH RECURSIVE subtree(directory_id) AS (
    VALUES(?1)
    UNION
    SELECT directory.directory_id
    FROM directory
    INNER JOIN subtree ON directory.parent_directory_id = subtree.directory_id
)
SELECT file.file_id, file.parent_directory_id, file.file_name
FROM file
INNER JOIN subtree ON file.parent_directory_id = subtree.directory_id
WHERE substr(file.file_name, 1, length(?2)) = ?2
LIMIT ?3
";

/// Files anywhere beneath `root_id` whose name starts with `name_prefix`,
/// at most `max_count` of them. Order is unspecified.
///
/// A root that does not exist has no descendants, so the result is empty.
pub(crate) async fn search_files_in_subtree(
    conn: &mut SqliteConnection,
    root_id: i64,
    name_prefix: &str,
    max_count: i64,
) -> Result<Vec<FileEntity>, sqlx::Error> {
    // SQLite reads a negative LIMIT as "no limit".
    let max_count = max_count.max(0);

    let rows = sqlx::query(SEARCH_FILES_IN_SUBTREE)
        .bind(root_id)
        .bind(name_prefix)
        .bind(max_count)
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok::<_, sqlx::Error>(FileEntity {
                id: row.try_get("file_id")?,
                parent_id: row.try_get("parent_directory_id")?,
                name: row.try_get("file_name")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::{insert, testing::scratch_store},
        schema::ROOT_DIRECTORY_ID,
    };

    async fn search(
        conn: &mut SqliteConnection,
        root_id: i64,
        prefix: &str,
        max_count: i64,
    ) -> Vec<FileEntity> {
        search_files_in_subtree(conn, root_id, prefix, max_count)
            .await
            .unwrap()
    }

    fn names(files: &[FileEntity]) -> Vec<&str> {
        let mut names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[tokio::test]
    async fn test_closure_reaches_every_depth_and_nothing_else() {
        let (_dir, conn) = scratch_store().await;
        let mut tx = conn.begin().await.unwrap();

        let a = insert::insert_directory(&mut tx, ROOT_DIRECTORY_ID, Some("a")).await.unwrap();
        let b = insert::insert_directory(&mut tx, a, Some("b")).await.unwrap();
        let c = insert::insert_directory(&mut tx, b, Some("c")).await.unwrap();
        let sibling = insert::insert_directory(&mut tx, ROOT_DIRECTORY_ID, Some("sibling"))
            .await
            .unwrap();

        insert::insert_file(&mut tx, a, Some("a.txt")).await.unwrap();
        insert::insert_file(&mut tx, c, Some("c.txt")).await.unwrap();
        insert::insert_file(&mut tx, sibling, Some("s.txt")).await.unwrap();
        insert::insert_file(&mut tx, ROOT_DIRECTORY_ID, Some("root.txt")).await.unwrap();

        let found = search(&mut tx, a, "", i64::MAX).await;
        assert_eq!(names(&found), ["a.txt", "c.txt"]);

        let found = search(&mut tx, c, "", i64::MAX).await;
        assert_eq!(names(&found), ["c.txt"]);

        let found = search(&mut tx, ROOT_DIRECTORY_ID, "", i64::MAX).await;
        assert_eq!(found.len(), 4);
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_prefix_is_literal_and_case_sensitive() {
        let (_dir, conn) = scratch_store().await;
        let mut tx = conn.begin().await.unwrap();

        for name in ["Report.pdf", "report.txt", "re%port", "rex"] {
            insert::insert_file(&mut tx, ROOT_DIRECTORY_ID, Some(name)).await.unwrap();
        }

        let found = search(&mut tx, ROOT_DIRECTORY_ID, "report", i64::MAX).await;
        assert_eq!(names(&found), ["report.txt"]);

        let found = search(&mut tx, ROOT_DIRECTORY_ID, "re%", i64::MAX).await;
        assert_eq!(names(&found), ["re%port"]);

        let found = search(&mut tx, ROOT_DIRECTORY_ID, "re_", i64::MAX).await;
        assert!(found.is_empty());
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_max_count_caps_rows() {
        let (_dir, conn) = scratch_store().await;
        let mut tx = conn.begin().await.unwrap();

        for i in 0..5 {
            let name = format!("f{i}");
            insert::insert_file(&mut tx, ROOT_DIRECTORY_ID, Some(name.as_str())).await.unwrap();
        }

        assert_eq!(search(&mut tx, ROOT_DIRECTORY_ID, "", 3).await.len(), 3);
        assert!(search(&mut tx, ROOT_DIRECTORY_ID, "", 0).await.is_empty());
        assert!(search(&mut tx, ROOT_DIRECTORY_ID, "", -1).await.is_empty());
        assert!(search(&mut tx, 9999, "", 10).await.is_empty());
        tx.commit().await.unwrap();
    }
}
