pub mod activities;
pub mod admin;
pub mod auth;
pub mod chatbot;
pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/me                         current user (requires auth)
///
/// /content                         list (public), create (ManageContent)
/// /content/{id}                    get (public), update, delete (ManageContent)
/// /content/{id}/view               record a view (PUT, public)
/// /content/{id}/download           record a download (PUT, public)
/// /content/{id}/like               toggle like (PUT, requires auth)
///
/// /activities                      list (public), create (ManageActivities)
/// /activities/{id}                 get (public), update, delete (ManageActivities)
/// /activities/{id}/register        register (POST), unregister (DELETE)
///
/// /chatbot/query                   rule-based Q&A (POST, public)
///
/// /admin/users                     list, create (ManageUsers)
/// /admin/users/{id}                update (ManageUsers)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/content", content::router())
        .nest("/activities", activities::router())
        .nest("/chatbot", chatbot::router())
        .nest("/admin", admin::router())
}
