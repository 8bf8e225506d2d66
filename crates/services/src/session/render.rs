use quiz_core::model::{Evaluation, Question, SessionSummary};

use super::progress::Progress;

/// Display instruction emitted by the session state machine.
///
/// One-way: the presentation layer renders it and never hands state back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Question {
        question: Question,
        progress: Progress,
    },
    Feedback {
        evaluation: Evaluation,
        score: u32,
        accuracy: u8,
        is_complete: bool,
    },
    Results(SessionSummary),
    /// Elapsed time as `MM:SS`.
    Timer(String),
    Score(u32),
    /// Progress bar percentage.
    Progress(u8),
    /// Whether the submit affordance accepts input.
    SubmitEnabled(bool),
    /// Blocking, user-visible message.
    Alert(String),
    /// The quiz view was closed and the session discarded.
    Closed,
}

/// Receiver of render instructions.
pub trait Presenter {
    fn present(&mut self, render: Render);
}

/// Records instructions in order; handy for headless callers and tests.
impl Presenter for Vec<Render> {
    fn present(&mut self, render: Render) {
        self.push(render);
    }
}
