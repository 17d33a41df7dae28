//! Handlers for user administration. All routes require ManageUsers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use sakap_core::error::CoreError;
use sakap_core::roles::{validate_role, ROLE_FARMER};
use sakap_core::types::DbId;
use sakap_db::models::user::{CreateUser, UpdateUser, UserResponse};
use sakap_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::capability::RequireManageUsers;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireManageUsers(_admin): RequireManageUsers,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users
///
/// Create an account. The role defaults to `farmer` when omitted.
pub async fn create_user(
    RequireManageUsers(admin): RequireManageUsers,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let role = input.role.as_deref().unwrap_or(ROLE_FARMER);
    validate_role(role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &input.username,
        &input.email,
        &password_hash,
        role,
        input.full_name.as_deref(),
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        created_by = admin.user_id,
        "User created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update account fields, including role changes and deactivation.
pub async fn update_user(
    RequireManageUsers(admin): RequireManageUsers,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    if let Some(ref role) = input.role {
        validate_role(role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let user = UserRepo::update(
        &state.pool,
        id,
        input.email.as_deref(),
        input.role.as_deref(),
        input.full_name.as_deref(),
        input.is_active,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id,
    }))?;

    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
