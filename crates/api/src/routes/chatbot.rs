//! Route definitions for the Q&A chatbot. Mounted at `/chatbot`.

use axum::routing::post;
use axum::Router;

use crate::handlers::chatbot;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/query", post(chatbot::query))
}
