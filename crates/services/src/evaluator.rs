//! Grading of submitted answers.

use async_trait::async_trait;
use tracing::warn;

use quiz_core::model::{Evaluation, Question, SessionId, TOTAL_QUESTIONS};

use crate::error::SourceError;
use crate::remote::QuizApiClient;

pub const FALLBACK_EXPLANATION: &str =
    "Detailed explanations are only available while the quiz service is reachable.";

/// One answer handed to an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub session_id: SessionId,
    pub question: Question,
    pub selected_index: usize,
    /// Number of questions answered before this one.
    pub question_index: u32,
}

/// Contract for grading a submission. Never fails; see `FallbackEvaluator`.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, submission: &Submission) -> Evaluation;
}

/// Fixed offline rule: option 0 is always the correct one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackEvaluator;

impl FallbackEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn grade(submission: &Submission) -> Evaluation {
        Evaluation {
            correct: submission.selected_index == 0,
            correct_answer_text: submission.question.option(0).unwrap_or_default().to_owned(),
            explanation: FALLBACK_EXPLANATION.to_owned(),
            is_session_complete: submission.question_index.saturating_add(1) >= TOTAL_QUESTIONS,
        }
    }
}

#[async_trait]
impl AnswerEvaluator for FallbackEvaluator {
    async fn evaluate(&self, submission: &Submission) -> Evaluation {
        Self::grade(submission)
    }
}

/// Grades through the quiz service, falling back to `FallbackEvaluator` on any failure.
#[derive(Clone, Debug)]
pub struct RemoteEvaluator {
    client: QuizApiClient,
}

impl RemoteEvaluator {
    #[must_use]
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerEvaluator for RemoteEvaluator {
    async fn evaluate(&self, submission: &Submission) -> Evaluation {
        let result = self
            .client
            .answer(
                &submission.session_id,
                &submission.question,
                submission.selected_index,
            )
            .await;

        match result {
            Ok(evaluation) => evaluation,
            Err(SourceError::LocalSession) => FallbackEvaluator::grade(submission),
            Err(err) => {
                warn!(
                    session = %submission.session_id,
                    question = %submission.question.id(),
                    error = %err,
                    "answer evaluator unavailable, using fallback rule"
                );
                FallbackEvaluator::grade(submission)
            }
        }
    }
}
