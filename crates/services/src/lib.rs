#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod evaluator;
pub mod remote;
pub mod session;
pub mod source;

pub use quiz_core::Clock;

pub use config::{Backends, QuizConfig, SourceMode};
pub use error::{ConfigError, SessionError, SourceError};
pub use evaluator::{AnswerEvaluator, FallbackEvaluator, RemoteEvaluator, Submission};
pub use remote::QuizApiClient;
pub use session::{
    Completion, Effect, Presenter, Progress, QuizSession, Render, SessionLoop, SessionState, Step,
};
pub use source::{FallbackQuestionSource, QuestionSource, RemoteQuestionSource};
