//! Route definitions for training activities.
//!
//! Mounted at `/activities` in the API route tree.
//!
//! ```text
//! GET    /                   list_activities
//! POST   /                   create_activity
//! GET    /{id}               get_activity
//! PUT    /{id}               update_activity
//! DELETE /{id}               delete_activity
//! POST   /{id}/register      register
//! DELETE /{id}/register      unregister
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(activity::list_activities).post(activity::create_activity),
        )
        .route(
            "/{id}",
            get(activity::get_activity)
                .put(activity::update_activity)
                .delete(activity::delete_activity),
        )
        .route(
            "/{id}/register",
            post(activity::register).delete(activity::unregister),
        )
}
