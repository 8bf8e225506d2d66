use axum::Json;
use axum::extract::State;
use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;

use quiz_core::model::{POINTS_PER_CORRECT, SessionSummary, TOTAL_QUESTIONS};
use quiz_core::time::whole_seconds_between;
use quiz_core::wire::{
    AnswerRequest, AnswerResponse, CompleteResponse, QuestionResponse, SessionRequest,
    StartResponse, WireProgress, WireQuestion,
};

use crate::bank::{BankEntry, QUESTION_BANK};
use crate::error::ApiError;
use crate::state::{AppState, ServerSession};

fn new_session_id() -> String {
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    format!("student_{}_{suffix}", Utc::now().timestamp())
}

/// Draw `TOTAL_QUESTIONS` distinct entries in random order.
fn sample_questions() -> Vec<&'static BankEntry> {
    let amount = usize::try_from(TOTAL_QUESTIONS).unwrap_or(QUESTION_BANK.len());
    QUESTION_BANK
        .choose_multiple(&mut rand::rng(), amount)
        .collect()
}

fn wire_question(entry: &BankEntry, question_number: u32) -> WireQuestion {
    WireQuestion {
        id: entry.id.to_owned(),
        text: entry.question.to_owned(),
        options: entry.options.iter().map(|o| (*o).to_owned()).collect(),
        subject: entry.subject.to_owned(),
        difficulty: entry.difficulty,
        question_number,
    }
}

pub async fn start(State(state): State<AppState>) -> Result<Json<StartResponse>, ApiError> {
    let session_id = new_session_id();
    let session = ServerSession::new(sample_questions(), Utc::now());
    let total = session.total();

    state.sessions()?.insert(session_id.clone(), session);
    tracing::info!(session = %session_id, "quiz session started");

    Ok(Json(StartResponse {
        success: true,
        session_id: Some(session_id),
        message: Some("Mixed subject quiz session started".into()),
        total_questions: Some(total),
        error: None,
    }))
}

pub async fn question(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let sessions = state.sessions()?;
    let session = sessions
        .get(&req.session_id)
        .ok_or(ApiError::InvalidSession)?;
    let entry = session.current_entry().ok_or(ApiError::AlreadyComplete)?;

    let number = session.answered() + 1;
    let total = session.total();
    Ok(Json(QuestionResponse {
        success: true,
        question: Some(wire_question(entry, number)),
        progress: Some(WireProgress {
            current: number,
            total,
            percentage: f64::from(number) / f64::from(total) * 100.0,
        }),
        is_complete: false,
        error: None,
    }))
}

pub async fn answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let mut sessions = state.sessions()?;
    let session = sessions
        .get_mut(&req.session_id)
        .ok_or(ApiError::InvalidSession)?;
    let entry = session.current_entry().ok_or(ApiError::AlreadyComplete)?;

    if entry.id != req.question_id {
        return Err(ApiError::QuestionMismatch);
    }
    if req.selected_index >= entry.options.len() {
        return Err(ApiError::InvalidAnswer {
            index: req.selected_index,
        });
    }

    let correct = req.selected_index == entry.correct;
    if correct {
        session.score += POINTS_PER_CORRECT;
        session.correct += 1;
    }
    session.current += 1;

    tracing::debug!(
        session = %req.session_id,
        question = entry.id,
        correct,
        "answer graded"
    );

    Ok(Json(AnswerResponse {
        success: true,
        correct,
        correct_answer: Some(entry.correct_answer().to_owned()),
        explanation: Some(entry.explanation.to_owned()),
        new_score: session.score,
        questions_answered: session.answered(),
        is_complete: session.is_complete(),
        error: None,
    }))
}

/// Summarise and forget the session.
pub async fn complete(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<CompleteResponse>, ApiError> {
    let session = state
        .sessions()?
        .remove(&req.session_id)
        .ok_or(ApiError::InvalidSession)?;

    let elapsed = whole_seconds_between(session.started_at, Utc::now());
    let summary = SessionSummary::from_counts(session.answered(), session.correct, elapsed);
    tracing::info!(
        session = %req.session_id,
        score = summary.final_score(),
        level = %summary.level_achieved(),
        "quiz session completed"
    );

    Ok(Json(CompleteResponse {
        success: true,
        summary: Some(summary),
        error: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sampled_questions_are_distinct() {
        let picked = sample_questions();
        assert_eq!(picked.len(), TOTAL_QUESTIONS as usize);
        let ids: HashSet<_> = picked.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), picked.len());
    }

    #[test]
    fn session_ids_carry_student_prefix() {
        let id = new_session_id();
        assert!(id.starts_with("student_"));
        let suffix: u16 = id.rsplit('_').next().unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }
}
