//! Capability-based authorization extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not hold the required [`Capability`]. Handlers never compare role
//! strings; the role -> permission mapping lives in
//! `sakap_core::roles::capabilities_for_role`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use sakap_core::error::CoreError;
use sakap_core::roles::{has_capability, Capability};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject with 403 Forbidden unless the user's role holds the capability.
pub fn ensure_capability(user: &AuthUser, capability: Capability) -> Result<(), AppError> {
    if has_capability(&user.role, capability) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Role '{}' lacks the {capability:?} capability",
            user.role
        ))))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Requires the [`Capability::ManageContent`] capability (admin, AEW).
///
/// ```ignore
/// async fn upload(RequireManageContent(user): RequireManageContent) -> AppResult<Json<()>> {
///     // user's role is guaranteed to hold ManageContent here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManageContent(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageContent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_capability(&user, Capability::ManageContent)?;
        Ok(RequireManageContent(user))
    }
}

/// Requires the [`Capability::ManageActivities`] capability (admin, AEW).
pub struct RequireManageActivities(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageActivities {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_capability(&user, Capability::ManageActivities)?;
        Ok(RequireManageActivities(user))
    }
}

/// Requires the [`Capability::ManageUsers`] capability (admin only).
pub struct RequireManageUsers(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageUsers {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_capability(&user, Capability::ManageUsers)?;
        Ok(RequireManageUsers(user))
    }
}
