//! Repository for library content metadata.
//!
//! Engagement counters (views, downloads, likes) are owned by
//! [`EngagementRepo`](super::EngagementRepo); this repo never touches them
//! beyond selecting the columns.

use sqlx::PgPool;

use sakap_core::types::DbId;

use crate::models::content::{ContentItem, ContentListParams, CreateContent, UpdateContent};

/// Column list for `content_items` queries.
const CONTENT_COLUMNS: &str = "\
    id, title, description, content_kind, file_path, uploaded_by, \
    view_count, download_count, like_count, created_at, updated_at";

/// Default page size for content listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for content listing.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for library content.
pub struct ContentRepo;

impl ContentRepo {
    /// Create a new content item. Counters start at zero.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContent,
        uploaded_by: Option<DbId>,
    ) -> Result<ContentItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_items (title, description, content_kind, file_path, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(input.title.trim())
            .bind(input.description.as_deref())
            .bind(&input.content_kind)
            .bind(&input.file_path)
            .bind(uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// Find a content item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM content_items WHERE id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List content items, optionally filtered by kind, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &ContentListParams,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        if let Some(ref kind) = params.kind {
            let query = format!(
                "SELECT {CONTENT_COLUMNS} FROM content_items \
                 WHERE content_kind = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
            );
            sqlx::query_as::<_, ContentItem>(&query)
                .bind(kind)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        } else {
            let query = format!(
                "SELECT {CONTENT_COLUMNS} FROM content_items \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            );
            sqlx::query_as::<_, ContentItem>(&query)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await
        }
    }

    /// Update content metadata. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContent,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                content_kind = COALESCE($4, content_kind) \
             WHERE id = $1 \
             RETURNING {CONTENT_COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.content_kind.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a content item. Cascades to its like records.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Verify that a content item exists by ID.
    pub async fn verify_exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_items WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0 > 0)
    }
}
