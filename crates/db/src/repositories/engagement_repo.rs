//! Repository for content engagement: view/download counters and the
//! per-user like toggle.
//!
//! Counter updates are single atomic in-place statements
//! (`SET view_count = view_count + 1 ... RETURNING`), never a read in
//! application code followed by a write -- two concurrent increments that
//! both read 5 and both write 6 would silently drop one. The like toggle
//! runs membership change and counter change in one transaction, arbitrated
//! by the `uq_content_likes_content_user` unique constraint, so the counter
//! always equals the number of like rows.

use sqlx::PgPool;

use sakap_core::types::DbId;

use crate::models::content::LikeOutcome;

/// Owns all mutation of content engagement state.
pub struct EngagementRepo;

impl EngagementRepo {
    /// Atomically increment the view counter.
    ///
    /// Returns the new count, or `None` if the content does not exist.
    pub async fn record_view(pool: &PgPool, content_id: DbId) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE content_items SET view_count = view_count + 1 \
             WHERE id = $1 RETURNING view_count",
        )
        .bind(content_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(count,)| count))
    }

    /// Atomically increment the download counter.
    ///
    /// Returns the new count, or `None` if the content does not exist.
    pub async fn record_download(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE content_items SET download_count = download_count + 1 \
             WHERE id = $1 RETURNING download_count",
        )
        .bind(content_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(count,)| count))
    }

    /// Toggle the caller's like for a content item.
    ///
    /// Unlike-first: if a like row exists for (content, user) it is deleted
    /// and the counter decremented (floored at zero); otherwise a row is
    /// inserted and the counter incremented. Both halves commit together or
    /// not at all.
    ///
    /// Two toggles from the same user racing to like simultaneously are
    /// resolved by the unique constraint: the loser's
    /// `ON CONFLICT DO NOTHING` insert affects no rows, and instead of
    /// incrementing it re-reads the winner's committed state. The counter
    /// moves exactly once. Toggles by different users only touch their own
    /// like rows plus the atomic counter update, so they never block each
    /// other.
    ///
    /// Returns `None` if the content does not exist; no state is mutated.
    pub async fn toggle_like(
        pool: &PgPool,
        content_id: DbId,
        user_id: DbId,
    ) -> Result<Option<LikeOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> = sqlx::query_as("SELECT id FROM content_items WHERE id = $1")
            .bind(content_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let deleted = sqlx::query(
            "DELETE FROM content_likes WHERE content_id = $1 AND user_id = $2",
        )
        .bind(content_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let outcome = if deleted.rows_affected() > 0 {
            let (like_count,): (i64,) = sqlx::query_as(
                "UPDATE content_items SET like_count = GREATEST(like_count - 1, 0) \
                 WHERE id = $1 RETURNING like_count",
            )
            .bind(content_id)
            .fetch_one(&mut *tx)
            .await?;

            LikeOutcome {
                liked_by_user: false,
                like_count,
            }
        } else {
            let inserted = sqlx::query(
                "INSERT INTO content_likes (content_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT (content_id, user_id) DO NOTHING",
            )
            .bind(content_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            if inserted.rows_affected() > 0 {
                let (like_count,): (i64,) = sqlx::query_as(
                    "UPDATE content_items SET like_count = like_count + 1 \
                     WHERE id = $1 RETURNING like_count",
                )
                .bind(content_id)
                .fetch_one(&mut *tx)
                .await?;

                LikeOutcome {
                    liked_by_user: true,
                    like_count,
                }
            } else {
                // Lost an insert race against our own concurrent toggle.
                // The winner already moved the counter; report its state.
                tracing::debug!(content_id, user_id, "like insert race, reconciling");

                let (like_count,): (i64,) =
                    sqlx::query_as("SELECT like_count FROM content_items WHERE id = $1")
                        .bind(content_id)
                        .fetch_one(&mut *tx)
                        .await?;

                LikeOutcome {
                    liked_by_user: true,
                    like_count,
                }
            }
        };

        tx.commit().await?;
        Ok(Some(outcome))
    }

    /// Whether the user currently holds a like for the content.
    pub async fn has_user_liked(
        pool: &PgPool,
        content_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM content_likes WHERE content_id = $1 AND user_id = $2",
        )
        .bind(content_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.0 > 0)
    }

    /// Derived like count from the membership table.
    ///
    /// The denormalized `like_count` column must always agree with this;
    /// integration tests assert it after every mutation pattern.
    pub async fn derived_like_count(pool: &PgPool, content_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM content_likes WHERE content_id = $1")
                .bind(content_id)
                .fetch_one(pool)
                .await?;
        Ok(count.0)
    }
}
