//! Route definitions for library content.
//!
//! Mounted at `/content` in the API route tree.
//!
//! ```text
//! GET    /                 list_content
//! POST   /                 create_content
//! GET    /{id}             get_content
//! PUT    /{id}             update_content
//! DELETE /{id}             delete_content
//! PUT    /{id}/view        record_view
//! PUT    /{id}/download    record_download
//! PUT    /{id}/like        toggle_like
//! ```

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{content, engagement};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content).post(content::create_content))
        .route(
            "/{id}",
            get(content::get_content)
                .put(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/view", put(engagement::record_view))
        .route("/{id}/download", put(engagement::record_download))
        .route("/{id}/like", put(engagement::toggle_like))
}
