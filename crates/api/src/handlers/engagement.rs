//! Handlers for content engagement: view/download counters and the like
//! toggle.
//!
//! The repository performs every mutation as an atomic storage-side
//! operation; these handlers only translate between HTTP and
//! [`EngagementRepo`].

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use sakap_core::error::CoreError;
use sakap_core::roles::Capability;
use sakap_core::types::DbId;
use sakap_db::repositories::EngagementRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::capability::{ensure_capability, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for `PUT /content/{id}/view`.
#[derive(Debug, Serialize)]
pub struct ViewCountResponse {
    pub view_count: i64,
}

/// Response payload for `PUT /content/{id}/download`.
#[derive(Debug, Serialize)]
pub struct DownloadCountResponse {
    pub download_count: i64,
}

/// PUT /api/v1/content/{id}/view
///
/// Record a view. Public: reading library content requires no account.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view_count = EngagementRepo::record_view(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: ViewCountResponse { view_count },
    }))
}

/// PUT /api/v1/content/{id}/download
///
/// Record a download. Public.
pub async fn record_download(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let download_count = EngagementRepo::record_download(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: DownloadCountResponse { download_count },
    }))
}

/// PUT /api/v1/content/{id}/like
///
/// Toggle the caller's like for a content item. Requires authentication;
/// an anonymous request cannot hold like membership.
pub async fn toggle_like(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_capability(&user, Capability::EngageWithContent)?;

    let outcome = EngagementRepo::toggle_like(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    tracing::info!(
        content_id = id,
        user_id = user.user_id,
        liked = outcome.liked_by_user,
        like_count = outcome.like_count,
        "Like toggled",
    );

    Ok(Json(DataResponse { data: outcome }))
}
