use std::sync::Arc;

use tracing::{error, warn};

use quiz_core::model::SessionId;

use super::effect::{Completion, Effect, Step};
use super::machine::QuizSession;
use super::render::{Presenter, Render};
use crate::config::Backends;
use crate::error::SessionError;
use crate::evaluator::AnswerEvaluator;
use crate::source::QuestionSource;

pub const NO_SELECTION_PROMPT: &str = "Please select an answer before submitting.";
pub const STARTUP_FAILURE_ALERT: &str = "Failed to start quiz. Please try again.";

/// Performs the effects a `QuizSession` asks for and forwards renders to a `Presenter`.
///
/// The session stays owned by the caller; the loop only borrows it per intent.
#[derive(Clone)]
pub struct SessionLoop {
    questions: Arc<dyn QuestionSource>,
    evaluator: Arc<dyn AnswerEvaluator>,
}

impl SessionLoop {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionSource>, evaluator: Arc<dyn AnswerEvaluator>) -> Self {
        Self {
            questions,
            evaluator,
        }
    }

    #[must_use]
    pub fn from_backends(backends: Backends) -> Self {
        Self::new(backends.questions, backends.evaluator)
    }

    /// Perform one effect on a spawned task.
    ///
    /// A task that panics or is cancelled yields `Completion::Failed` instead of
    /// tearing down the caller. Must be called within a tokio runtime.
    pub async fn resolve(&self, effect: Effect) -> Completion {
        let ticket = effect.ticket();
        let questions = Arc::clone(&self.questions);
        let evaluator = Arc::clone(&self.evaluator);

        let task = tokio::spawn(async move {
            match effect {
                Effect::OpenSession { ticket } => {
                    let session_id = match questions.open_session().await {
                        Ok(id) => id,
                        Err(err) => {
                            warn!(error = %err, "could not open remote session, continuing offline");
                            SessionId::local()
                        }
                    };
                    Completion::SessionOpened { ticket, session_id }
                }
                Effect::FetchQuestion {
                    ticket,
                    session_id,
                    index,
                } => Completion::QuestionLoaded {
                    ticket,
                    question: questions.request_question(&session_id, index).await,
                },
                Effect::Evaluate { ticket, submission } => Completion::AnswerEvaluated {
                    ticket,
                    evaluation: evaluator.evaluate(&submission).await,
                },
            }
        });

        match task.await {
            Ok(completion) => completion,
            Err(err) => {
                error!(error = %err, "quiz request task failed");
                Completion::Failed {
                    ticket,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Close a finished remote session on a spawned task and wait for it.
    ///
    /// Failures are logged by the source; a panicking task is logged here.
    pub async fn release(&self, session_id: SessionId) {
        let questions = Arc::clone(&self.questions);
        let task = tokio::spawn(async move { questions.close_session(&session_id).await });
        if let Err(err) = task.await {
            error!(error = %err, "session release task failed");
        }
    }

    /// Present `step` and keep resolving effects until the session settles.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Startup` if the session could not be opened.
    pub async fn drive(
        &self,
        session: &mut QuizSession,
        mut step: Step,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        loop {
            for render in step.renders.drain(..) {
                presenter.present(render);
            }
            if let Some(session_id) = step.release.take() {
                self.release(session_id).await;
            }
            let Some(effect) = step.effect.take() else {
                return Ok(());
            };
            let completion = self.resolve(effect).await;
            step = surface(session.apply(completion), presenter)?;
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError` if the session cannot start; an alert has been presented.
    pub async fn start_session(
        &self,
        session: &mut QuizSession,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        let step = surface(session.start_session(), presenter)?;
        self.drive(session, step, presenter).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` for an out-of-range choice.
    pub fn select_option(
        &self,
        session: &mut QuizSession,
        index: usize,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        let step = surface(session.select_option(index), presenter)?;
        present_all(step, presenter);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` after prompting the user to choose.
    pub async fn submit_answer(
        &self,
        session: &mut QuizSession,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        let step = surface(session.submit_answer(), presenter)?;
        self.drive(session, step, presenter).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the feedback screen.
    pub async fn advance(
        &self,
        session: &mut QuizSession,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        let step = surface(session.advance(), presenter)?;
        self.drive(session, step, presenter).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the results screen.
    pub async fn restart(
        &self,
        session: &mut QuizSession,
        presenter: &mut dyn Presenter,
    ) -> Result<(), SessionError> {
        let step = surface(session.restart(), presenter)?;
        self.drive(session, step, presenter).await
    }

    pub async fn exit(&self, session: &mut QuizSession, presenter: &mut dyn Presenter) {
        let mut step = session.exit();
        let release = step.release.take();
        present_all(step, presenter);
        if let Some(session_id) = release {
            self.release(session_id).await;
        }
    }

    pub fn tick(&self, session: &mut QuizSession, presenter: &mut dyn Presenter) {
        present_all(session.tick(), presenter);
    }
}

/// Present a step that needs no follow-up work.
pub fn present_all(step: Step, presenter: &mut dyn Presenter) {
    debug_assert!(step.effect.is_none() && step.release.is_none());
    for render in step.renders {
        presenter.present(render);
    }
}

/// Turn user-facing errors into alerts before handing them back.
///
/// # Errors
///
/// Passes `result`'s error through unchanged.
pub fn surface(
    result: Result<Step, SessionError>,
    presenter: &mut dyn Presenter,
) -> Result<Step, SessionError> {
    result.inspect_err(|err| match err {
        SessionError::NoSelection => presenter.present(Render::Alert(NO_SELECTION_PROMPT.into())),
        SessionError::Startup(_) => presenter.present(Render::Alert(STARTUP_FAILURE_ALERT.into())),
        _ => {}
    })
}
