use sqlx::SqliteConnection;

const INSERT_DIRECTORY: &str =
    "INSERT INTO directory (parent_directory_id, directory_name) VALUES (?1, ?2)";

const INSERT_FILE: &str = "INSERT INTO file (parent_directory_id, file_name) VALUES (?1, ?2)";

/// Insert a directory and return its engine-assigned id.
///
/// A `None` name is bound as NULL and rejected by the NOT NULL constraint.
pub(crate) async fn insert_directory(
    conn: &mut SqliteConnection,
    parent_id: i64,
    name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    insert(conn, INSERT_DIRECTORY, parent_id, name).await
}

/// Insert a file and return its engine-assigned id.
pub(crate) async fn insert_file(
    conn: &mut SqliteConnection,
    parent_id: i64,
    name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    insert(conn, INSERT_FILE, parent_id, name).await
}

async fn insert(
    conn: &mut SqliteConnection,
    sql: &'static str,
    parent_id: i64,
    name: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(sql)
        .bind(parent_id)
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}
