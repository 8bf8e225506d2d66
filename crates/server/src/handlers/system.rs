use axum::Json;
use axum::extract::State;
use chrono::Utc;

use quiz_core::model::TOTAL_QUESTIONS;
use quiz_core::wire::HealthResponse;

use crate::bank::QUESTION_BANK;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let active_sessions = state.sessions()?.len();
    Ok(Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Utc::now().to_rfc3339(),
        active_sessions,
        total_questions: QUESTION_BANK.len(),
        questions_per_quiz: TOTAL_QUESTIONS,
    }))
}
