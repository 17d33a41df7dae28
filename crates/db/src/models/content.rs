//! Library content models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sakap_core::types::{DbId, Timestamp};

/// A row from the `content_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// One of `pdf`, `video`, `audio`, `document`.
    pub content_kind: String,
    pub file_path: String,
    pub uploaded_by: Option<DbId>,
    pub view_count: i64,
    pub download_count: i64,
    pub like_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for uploading new content.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub content_kind: String,
    #[validate(length(min = 1))]
    pub file_path: String,
}

/// DTO for updating content metadata. Counters are never updated this way.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_kind: Option<String>,
}

/// Query filters for content listing.
#[derive(Debug, Deserialize)]
pub struct ContentListParams {
    /// Filter by content kind.
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A row from the `content_likes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentLike {
    pub id: DbId,
    pub content_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// Result of a like toggle: the caller's new membership state and the
/// counter as of this toggle committing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeOutcome {
    pub liked_by_user: bool,
    pub like_count: i64,
}
