use crate::model::question::Question;

/// Outcome of grading one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
    pub correct_answer_text: String,
    pub explanation: String,
    /// True once the question just graded was the last one of the session.
    pub is_session_complete: bool,
}

/// Immutable snapshot of an answered question, taken when feedback is shown.
///
/// Holds the question by value; nothing else keeps it once it has been answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    question: Question,
    selected_index: usize,
    correct: bool,
    response_seconds: u32,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(
        question: Question,
        selected_index: usize,
        correct: bool,
        response_seconds: u32,
    ) -> Self {
        debug_assert!(selected_index < question.options().len());
        Self {
            question,
            selected_index,
            correct,
            response_seconds,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn response_seconds(&self) -> u32 {
        self.response_seconds
    }
}
