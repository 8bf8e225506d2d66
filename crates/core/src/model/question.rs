use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Smallest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;
/// Largest number of options a question may offer.
pub const MAX_OPTIONS: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("question must offer between 2 and 4 options, got {count}")]
    OptionCount { count: usize },

    #[error("numeric difficulty must be 1-3, got {0}")]
    Difficulty(u8),

    #[error("question number must be at least 1")]
    QuestionNumber,
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Categorical difficulty of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    /// Maps the 1-3 numeric scale used on the wire to a level.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::Difficulty` for values outside 1-3.
    pub fn from_numeric(value: u8) -> Result<Self, QuestionError> {
        match value {
            1 => Ok(Self::Beginner),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::Advanced),
            _ => Err(QuestionError::Difficulty(value)),
        }
    }

    #[must_use]
    pub fn numeric(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice item issued for one position in a session.
///
/// Validated on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    subject: String,
    difficulty: DifficultyLevel,
    question_number: u32,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, the option count is not 2-4,
    /// the difficulty is outside 1-3 or the question number is zero.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        subject: impl Into<String>,
        numeric_difficulty: u8,
        question_number: u32,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(QuestionError::OptionCount {
                count: options.len(),
            });
        }
        let difficulty = DifficultyLevel::from_numeric(numeric_difficulty)?;
        if question_number == 0 {
            return Err(QuestionError::QuestionNumber);
        }

        Ok(Self {
            id,
            text,
            options,
            subject: subject.into(),
            difficulty,
            question_number,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty
    }

    #[must_use]
    pub fn numeric_difficulty(&self) -> u8 {
        self.difficulty.numeric()
    }

    /// 1-based position of this question within its session.
    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    /// Same question issued at another position.
    #[must_use]
    pub fn renumbered(mut self, question_number: NonZeroU32) -> Self {
        self.question_number = question_number.get();
        self
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn renumbering_keeps_content() {
        let q = Question::new(QuestionId::new("q1"), "2 + 2?", options(2), "Mathematics", 1, 1)
            .unwrap();
        let moved = q.clone().renumbered(NonZeroU32::new(7).unwrap());
        assert_eq!(moved.question_number(), 7);
        assert_eq!(moved.id(), q.id());
        assert_eq!(moved.options(), q.options());
    }

    #[test]
    fn builds_valid_question() {
        let q = Question::new(QuestionId::new("q1"), "2 + 2?", options(4), "Mathematics", 2, 3)
            .unwrap();
        assert_eq!(q.difficulty_level(), DifficultyLevel::Intermediate);
        assert_eq!(q.numeric_difficulty(), 2);
        assert_eq!(q.question_number(), 3);
        assert_eq!(q.option(1), Some("option 1"));
        assert_eq!(q.option(4), None);
    }

    #[test]
    fn rejects_blank_text() {
        let err = Question::new(QuestionId::new("q"), "  ", options(2), "Science", 1, 1)
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn rejects_option_counts_outside_range() {
        for n in [0, 1, 5] {
            let err = Question::new(QuestionId::new("q"), "text", options(n), "Science", 1, 1)
                .unwrap_err();
            assert_eq!(err, QuestionError::OptionCount { count: n });
        }
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let err = Question::new(QuestionId::new("q"), "text", options(3), "Science", 4, 1)
            .unwrap_err();
        assert_eq!(err, QuestionError::Difficulty(4));
    }

    #[test]
    fn rejects_zero_question_number() {
        let err = Question::new(QuestionId::new("q"), "text", options(3), "Science", 1, 0)
            .unwrap_err();
        assert_eq!(err, QuestionError::QuestionNumber);
    }
}
