//! Shelf (books) database operations

use bookshelf_common::db::models::{Book, ReadingStatus};
use bookshelf_common::Result;
use sqlx::SqlitePool;

use crate::services::catalog::BookDetail;

/// Look up a user's shelf row for an external catalog id
///
/// The lookup is scoped to the owning user: the same book may sit on
/// several users' shelves, each as its own row.
pub async fn find_for_user(
    pool: &SqlitePool,
    external_id: &str,
    user_id: i64,
) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        SELECT id, external_id, title, authors, cover_url, published_date, status, user_id
        FROM books_table
        WHERE external_id = ? AND user_id = ?
        "#,
    )
    .bind(external_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

/// Insert a shelf row, or move the existing row to the new bucket
///
/// The ON CONFLICT clause rides on UNIQUE(external_id, user_id), so two
/// concurrent placements for the same user and book collapse into a single
/// row instead of racing a read-then-write.
pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    detail: &BookDetail,
    status: ReadingStatus,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO books_table (external_id, title, authors, cover_url, published_date, status, user_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(external_id, user_id) DO UPDATE SET
            status = excluded.status
        "#,
    )
    .bind(&detail.external_id)
    .bind(&detail.title)
    .bind(&detail.authors)
    .bind(&detail.cover_url)
    .bind(&detail.published_date)
    .bind(status.as_str())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Move an existing shelf row to a different bucket
pub async fn update_status(pool: &SqlitePool, book_id: i64, status: ReadingStatus) -> Result<()> {
    sqlx::query("UPDATE books_table SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(book_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// List a user's books in one bucket
pub async fn list_by_status(
    pool: &SqlitePool,
    user_id: i64,
    status: ReadingStatus,
) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT id, external_id, title, authors, cover_url, published_date, status, user_id
        FROM books_table
        WHERE user_id = ? AND status = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    Ok(books)
}
