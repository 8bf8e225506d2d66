use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::AnswerRecord;
use crate::time::format_mm_ss;

/// Number of questions in every session.
pub const TOTAL_QUESTIONS: u32 = 10;

/// Points awarded per correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Highest score a session can reach.
pub const MAX_SCORE: u32 = TOTAL_QUESTIONS * POINTS_PER_CORRECT;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("too many answers for a single session: {len}")]
    TooManyAnswers { len: usize },
}

/// Categorical label derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelAchieved {
    Beginner,
    Intermediate,
    Advanced,
}

impl LevelAchieved {
    /// `score >= 80` is Advanced, `score >= 60` Intermediate, anything lower Beginner.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::Advanced
        } else if score >= 60 {
            Self::Intermediate
        } else {
            Self::Beginner
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

impl fmt::Display for LevelAchieved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of `correct` out of `answered`, rounded half up. Zero when nothing was answered.
#[must_use]
pub fn accuracy_percent(correct: u32, answered: u32) -> u8 {
    if answered == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(answered));
    let answered = u64::from(answered);
    let rounded = (200 * correct + answered) / (2 * answered);
    u8::try_from(rounded).unwrap_or(100)
}

/// Aggregate shown once a session is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    total_questions: u32,
    correct_count: u32,
    final_score: u32,
    accuracy: u8,
    level_achieved: LevelAchieved,
    time_spent: String,
}

impl SessionSummary {
    /// Build a summary from the answer log of a session.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::TooManyAnswers` if the log length cannot fit in `u32`.
    pub fn from_answers(
        answers: &[AnswerRecord],
        elapsed_seconds: u32,
    ) -> Result<Self, SummaryError> {
        let total_questions = u32::try_from(answers.len())
            .map_err(|_| SummaryError::TooManyAnswers { len: answers.len() })?;

        let mut correct_count = 0_u32;
        for answer in answers {
            if answer.is_correct() {
                correct_count = correct_count.saturating_add(1);
            }
        }

        Ok(Self::from_counts(total_questions, correct_count, elapsed_seconds))
    }

    /// Build a summary from raw counts, as tracked by the remote service.
    #[must_use]
    pub fn from_counts(total_questions: u32, correct_count: u32, elapsed_seconds: u32) -> Self {
        let correct_count = correct_count.min(total_questions);
        let final_score = correct_count.saturating_mul(POINTS_PER_CORRECT);
        Self {
            total_questions,
            correct_count,
            final_score,
            accuracy: accuracy_percent(correct_count, total_questions),
            level_achieved: LevelAchieved::from_score(final_score),
            time_spent: format_mm_ss(elapsed_seconds),
        }
    }

    /// Number of questions answered.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    #[must_use]
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    #[must_use]
    pub fn level_achieved(&self) -> LevelAchieved {
        self.level_achieved
    }

    /// Elapsed session time as `MM:SS`.
    #[must_use]
    pub fn time_spent(&self) -> &str {
        &self.time_spent
    }
}
