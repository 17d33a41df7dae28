//! Handler for the rule-based Q&A chatbot.
//!
//! Dispatching is fully local: the question is matched against the static
//! rule table in `sakap_core::chatbot`. Unmatched questions get the
//! fallback answer; escalation to a richer answering service is a frontend
//! concern.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use sakap_core::chatbot::{match_intent, FALLBACK_ANSWER};
use sakap_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /chatbot/query`.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub question: String,
}

/// Response payload for a chatbot query.
#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    pub answer: &'static str,
    /// The matched rule's topic, absent for fallback answers.
    pub topic: Option<&'static str>,
    pub matched: bool,
}

/// POST /api/v1/chatbot/query
///
/// Answer a question from the rule table. Public.
pub async fn query(
    State(_state): State<AppState>,
    Json(input): Json<ChatQuery>,
) -> AppResult<impl IntoResponse> {
    if input.question.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Question must not be empty".into(),
        )));
    }

    let answer = match match_intent(&input.question) {
        Some(rule) => {
            tracing::debug!(topic = rule.topic, "Chatbot rule matched");
            ChatAnswer {
                answer: rule.answer,
                topic: Some(rule.topic),
                matched: true,
            }
        }
        None => ChatAnswer {
            answer: FALLBACK_ANSWER,
            topic: None,
            matched: false,
        },
    };

    Ok(Json(DataResponse { data: answer }))
}
