use quiz_core::model::{Evaluation, Generation, Question, SessionId};

use super::render::Render;
use crate::evaluator::Submission;

/// Identifies one outstanding request and the session incarnation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: Generation,
    seq: u64,
}

impl Ticket {
    pub(crate) fn new(generation: Generation, seq: u64) -> Self {
        Self { generation, seq }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Asynchronous work requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenSession {
        ticket: Ticket,
    },
    FetchQuestion {
        ticket: Ticket,
        session_id: SessionId,
        index: u32,
    },
    Evaluate {
        ticket: Ticket,
        submission: Submission,
    },
}

impl Effect {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Effect::OpenSession { ticket }
            | Effect::FetchQuestion { ticket, .. }
            | Effect::Evaluate { ticket, .. } => *ticket,
        }
    }
}

/// Result of an `Effect`, fed back through `QuizSession::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    SessionOpened {
        ticket: Ticket,
        session_id: SessionId,
    },
    QuestionLoaded {
        ticket: Ticket,
        question: Question,
    },
    AnswerEvaluated {
        ticket: Ticket,
        evaluation: Evaluation,
    },
    /// The work itself blew up (e.g. the task running it panicked).
    Failed {
        ticket: Ticket,
        reason: String,
    },
}

impl Completion {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Completion::SessionOpened { ticket, .. }
            | Completion::QuestionLoaded { ticket, .. }
            | Completion::AnswerEvaluated { ticket, .. }
            | Completion::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Renders to show plus at most one follow-up effect.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Step {
    pub renders: Vec<Render>,
    pub effect: Option<Effect>,
    /// Remote session that is finished with and can be closed. Best effort;
    /// nothing is fed back.
    pub release: Option<SessionId>,
}

impl Step {
    pub(crate) fn render(renders: Vec<Render>) -> Self {
        Self {
            renders,
            effect: None,
            release: None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.renders.is_empty() && self.effect.is_none() && self.release.is_none()
    }
}
