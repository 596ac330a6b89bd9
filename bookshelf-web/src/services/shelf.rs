//! Shelf manager
//!
//! Assigns and reassigns books to a user's reading-status buckets,
//! de-duplicating by (external catalog id, owning user).

use bookshelf_common::db::models::ReadingStatus;
use tracing::info;

use crate::db;
use crate::error::PageResult;
use crate::AppState;

/// Place a book into a bucket for a user.
///
/// - No row for (external_id, user): fetch detail from the catalog, insert
///   a new row owned by the user. The insert is an upsert on
///   UNIQUE(external_id, user_id), so a concurrent placement of the same
///   book cannot create a duplicate row.
/// - Row exists in a different bucket: move it (ownership unchanged).
/// - Row exists in the requested bucket: no-op.
///
/// If the catalog call fails or required detail fields are absent, the
/// operation fails and the shelf is left unchanged.
pub async fn place(
    state: &AppState,
    user_id: i64,
    external_id: &str,
    bucket: ReadingStatus,
) -> PageResult<()> {
    if let Some(existing) = db::books::find_for_user(&state.db, external_id, user_id).await? {
        if existing.status == bucket {
            return Ok(());
        }
        db::books::update_status(&state.db, existing.id, bucket).await?;
        info!(
            external_id = %external_id,
            user_id = user_id,
            bucket = bucket.as_str(),
            "Moved book to bucket"
        );
        return Ok(());
    }

    let detail = state.catalog.volume(external_id).await?;
    db::books::upsert(&state.db, user_id, &detail, bucket).await?;
    info!(
        external_id = %external_id,
        user_id = user_id,
        title = %detail.title,
        bucket = bucket.as_str(),
        "Added book to shelf"
    );

    Ok(())
}
