//! Handlers for training activities and registration.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use sakap_core::error::CoreError;
use sakap_core::roles::Capability;
use sakap_core::types::DbId;
use sakap_db::models::activity::{CreateActivity, RegistrationOutcome, UpdateActivity};
use sakap_db::repositories::ActivityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::capability::{ensure_capability, RequireAuth, RequireManageActivities};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activities
///
/// List activities with registration counts. Public.
pub async fn list_activities(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let activities = ActivityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: activities }))
}

/// GET /api/v1/activities/{id}
///
/// Get one activity. Public.
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activity = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;

    Ok(Json(DataResponse { data: activity }))
}

/// POST /api/v1/activities
///
/// Create a training activity. Requires ManageActivities.
pub async fn create_activity(
    RequireManageActivities(user): RequireManageActivities,
    State(state): State<AppState>,
    Json(input): Json<CreateActivity>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let activity = ActivityRepo::create(&state.pool, &input, Some(user.user_id)).await?;

    tracing::info!(
        activity_id = activity.id,
        title = %activity.title,
        user_id = user.user_id,
        "Activity created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: activity })))
}

/// PUT /api/v1/activities/{id}
///
/// Update an activity. Requires ManageActivities.
pub async fn update_activity(
    RequireManageActivities(user): RequireManageActivities,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivity>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let activity = ActivityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;

    tracing::info!(activity_id = id, user_id = user.user_id, "Activity updated");

    Ok(Json(DataResponse { data: activity }))
}

/// DELETE /api/v1/activities/{id}
///
/// Delete an activity and its registrations. Requires ManageActivities.
pub async fn delete_activity(
    RequireManageActivities(user): RequireManageActivities,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ActivityRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }));
    }

    tracing::info!(activity_id = id, user_id = user.user_id, "Activity deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/activities/{id}/register
///
/// Register the caller for an activity. Duplicate registrations and full
/// activities are reported as 409 Conflict.
pub async fn register(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_capability(&user, Capability::RegisterForActivities)?;

    let outcome = ActivityRepo::register(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }))?;

    match outcome {
        RegistrationOutcome::Registered(registration) => {
            tracing::info!(activity_id = id, user_id = user.user_id, "Registered");
            Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
        }
        RegistrationOutcome::AlreadyRegistered => Err(AppError::Core(CoreError::Conflict(
            "Already registered for this activity".into(),
        ))),
        RegistrationOutcome::Full => Err(AppError::Core(CoreError::Conflict(
            "Activity is at capacity".into(),
        ))),
    }
}

/// DELETE /api/v1/activities/{id}/register
///
/// Remove the caller's registration.
pub async fn unregister(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = ActivityRepo::unregister(&state.pool, id, user.user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }));
    }

    tracing::info!(activity_id = id, user_id = user.user_id, "Unregistered");

    Ok(StatusCode::NO_CONTENT)
}
