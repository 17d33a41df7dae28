//! Handlers for library content CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use sakap_core::content::validate_kind;
use sakap_core::error::CoreError;
use sakap_core::types::DbId;
use sakap_db::models::content::{ContentItem, ContentListParams, CreateContent, UpdateContent};
use sakap_db::repositories::{ContentRepo, EngagementRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::capability::RequireManageContent;
use crate::response::DataResponse;
use crate::state::AppState;

/// Content detail with the caller's like membership when authenticated.
#[derive(Debug, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    /// `None` for anonymous callers.
    pub liked_by_user: Option<bool>,
}

/// GET /api/v1/content
///
/// List library content, optionally filtered by kind. Public.
pub async fn list_content(
    State(state): State<AppState>,
    Query(params): Query<ContentListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref kind) = params.kind {
        validate_kind(kind).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let items = ContentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/content/{id}
///
/// Get one content item. Public; authenticated callers also get their own
/// like membership.
pub async fn get_content(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    let liked_by_user = match user {
        Some(user) => Some(EngagementRepo::has_user_liked(&state.pool, id, user.user_id).await?),
        None => None,
    };

    Ok(Json(DataResponse {
        data: ContentDetail {
            item,
            liked_by_user,
        },
    }))
}

/// POST /api/v1/content
///
/// Upload new content metadata. Requires ManageContent.
pub async fn create_content(
    RequireManageContent(user): RequireManageContent,
    State(state): State<AppState>,
    Json(input): Json<CreateContent>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_kind(&input.content_kind)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let item = ContentRepo::create(&state.pool, &input, Some(user.user_id)).await?;

    tracing::info!(
        content_id = item.id,
        title = %item.title,
        kind = %item.content_kind,
        user_id = user.user_id,
        "Content created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/content/{id}
///
/// Update content metadata. Counters are not editable through this path.
/// Requires ManageContent.
pub async fn update_content(
    RequireManageContent(user): RequireManageContent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContent>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    if let Some(ref kind) = input.content_kind {
        validate_kind(kind).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let item = ContentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }))?;

    tracing::info!(content_id = id, user_id = user.user_id, "Content updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/content/{id}
///
/// Delete a content item and its like records. Requires ManageContent.
pub async fn delete_content(
    RequireManageContent(user): RequireManageContent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ContentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id,
        }));
    }

    tracing::info!(content_id = id, user_id = user.user_id, "Content deleted");

    Ok(StatusCode::NO_CONTENT)
}
