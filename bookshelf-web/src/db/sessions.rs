//! Login session database operations
//!
//! Sessions are random UUID tokens stored server-side; the browser holds
//! only the token in an HttpOnly cookie.

use bookshelf_common::db::models::Session;
use bookshelf_common::Result;
use chrono::{Duration, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Create a session for a user, returning the token to set as a cookie
pub async fn create_session(pool: &SqlitePool, user_id: i64, ttl_hours: i64) -> Result<Session> {
    let session = Session {
        token: Uuid::new_v4().to_string(),
        user_id,
        expires_at: Utc::now() + Duration::hours(ttl_hours),
    };

    sqlx::query(
        r#"
        INSERT INTO sessions_table (token, user_id, expires_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&session.token)
    .bind(session.user_id)
    .bind(session.expires_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(session)
}

/// Load a session by token, treating expired rows as absent
pub async fn find_valid(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let row = sqlx::query(
        r#"
        SELECT token, user_id, expires_at
        FROM sessions_table
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let expires_at: String = row.get("expires_at");
    let expires_at = chrono::DateTime::parse_from_rfc3339(&expires_at)
        .map_err(|e| {
            bookshelf_common::Error::Internal(format!("Failed to parse expires_at: {}", e))
        })?
        .with_timezone(&Utc);

    if expires_at <= Utc::now() {
        // Expired session: remove the row and report no session
        delete_session(pool, token).await?;
        return Ok(None);
    }

    Ok(Some(Session {
        token: row.get("token"),
        user_id: row.get("user_id"),
        expires_at,
    }))
}

/// Delete a session by token (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions_table WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove all expired sessions
///
/// Called opportunistically at login so the table does not grow unbounded.
pub async fn purge_expired(pool: &SqlitePool) -> Result<usize> {
    let result = sqlx::query("DELETE FROM sessions_table WHERE expires_at <= ?")
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() as usize)
}
