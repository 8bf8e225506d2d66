//! JSON shapes exchanged with the remote quiz service.
//!
//! Shared by the HTTP client in `services` and the server in `quiz-server`.
//! Every response carries `success`; on failure only `error` is populated, so all
//! payload fields are optional or defaulted on the way in.

use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionError, QuestionId, SessionSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `/question` and `/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQuestion {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub subject: String,
    pub difficulty: u8,
    pub question_number: u32,
}

impl WireQuestion {
    /// Validate into a domain question, overriding the 1-based position.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the payload violates question invariants.
    pub fn into_question(self, question_number: u32) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            self.text,
            self.options,
            self.subject,
            self.difficulty,
            question_number,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WireProgress {
    pub current: u32,
    pub total: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<WireQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<WireProgress>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub question_id: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerResponse {
    pub success: bool,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub new_score: u32,
    pub questions_answered: u32,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub active_sessions: usize,
    pub total_questions: usize,
    pub questions_per_quiz: u32,
}

/// Body of any rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
