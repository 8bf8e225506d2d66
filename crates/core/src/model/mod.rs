mod answer;
mod ids;
mod question;
mod session;

pub use answer::{AnswerRecord, Evaluation};
pub use ids::{Generation, LOCAL_SESSION_PREFIX, QuestionId, SessionId};
pub use question::{DifficultyLevel, MAX_OPTIONS, MIN_OPTIONS, Question, QuestionError};
pub use session::{
    LevelAchieved, MAX_SCORE, POINTS_PER_CORRECT, SessionSummary, SummaryError, TOTAL_QUESTIONS,
    accuracy_percent,
};
