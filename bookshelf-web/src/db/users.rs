//! User account database operations

use bookshelf_common::db::models::User;
use bookshelf_common::Result;
use sqlx::SqlitePool;

/// Insert a new user, returning the assigned row id
pub async fn create_user(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users_table (first_name, last_name, email, password_hash)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Look up a user by email address
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email, password_hash
        FROM users_table
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Look up a user by row id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email, password_hash
        FROM users_table
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
