use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use quiz_core::Timer;
use quiz_core::model::{
    AnswerRecord, Evaluation, Generation, MAX_SCORE, POINTS_PER_CORRECT, Question, SessionId,
    SessionSummary, TOTAL_QUESTIONS, accuracy_percent,
};
use quiz_core::time::{Clock, whole_seconds_between};

use super::effect::{Completion, Effect, Step, Ticket};
use super::progress::Progress;
use super::render::Render;
use crate::error::SessionError;
use crate::evaluator::{FallbackEvaluator, Submission};
use crate::source::FallbackQuestionSource;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingAnswer,
    ShowingFeedback,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Open,
    Question,
    Answer {
        selected_index: usize,
        response_seconds: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: Ticket,
    pending: Pending,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one ten-question quiz attempt.
///
/// Performs no I/O: every operation returns a `Step` listing what to render and, at
/// most, one `Effect` for the caller to perform and feed back via `apply`. At most one
/// effect is outstanding at a time; completions from an older generation or for a
/// request that is no longer in flight are dropped.
#[derive(Debug)]
pub struct QuizSession {
    clock: Clock,
    generation: Generation,
    next_seq: u64,
    state: SessionState,
    session_id: Option<SessionId>,
    question_index: u32,
    score: u32,
    answer_log: Vec<AnswerRecord>,
    current: Option<Question>,
    selection: Option<usize>,
    shown_at: Option<DateTime<Utc>>,
    timer: Timer,
    in_flight: Option<InFlight>,
    summary: Option<SessionSummary>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Clock::default_clock())
    }
}

impl QuizSession {
    /// `clock` timestamps question display and submissions for response times.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            generation: Generation::default(),
            next_seq: 0,
            state: SessionState::Idle,
            session_id: None,
            question_index: 0,
            score: 0,
            answer_log: Vec::new(),
            current: None,
            selection: None,
            shown_at: None,
            timer: Timer::new(),
            in_flight: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Number of questions already answered.
    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.read()
    }

    #[must_use]
    pub fn timer_display(&self) -> String {
        self.timer.format()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// True while an effect is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        let correct = self.answer_log.iter().filter(|a| a.is_correct()).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Accuracy over the questions answered so far.
    #[must_use]
    pub fn accuracy(&self) -> u8 {
        accuracy_percent(self.correct_count(), self.question_index)
    }

    /// Progress of the question currently shown, if any.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.current
            .as_ref()
            .map(|_| Progress::of(self.question_index + 1, TOTAL_QUESTIONS))
    }

    //
    // ─── INTENTS ───────────────────────────────────────────────────────────────
    //

    /// Begin a fresh session from `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Idle` and
    /// `SessionError::Busy` while a start is already in flight.
    pub fn start_session(&mut self) -> Result<Step, SessionError> {
        self.ensure_idle_request()?;
        self.ensure_state(SessionState::Idle, "start a session")?;
        Ok(self.begin())
    }

    /// Record the pending choice for the current question. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` if `index` is out of range for the question.
    pub fn select_option(&mut self, index: usize) -> Result<Step, SessionError> {
        self.ensure_idle_request()?;
        self.ensure_state(SessionState::AwaitingAnswer, "select an option")?;
        let count = self.current_or_invalid("select an option")?.options().len();
        if index >= count {
            return Err(SessionError::InvalidOption { index, count });
        }

        self.selection = Some(index);
        Ok(Step::render(vec![Render::SubmitEnabled(true)]))
    }

    /// Submit the pending choice for grading.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` if no option was chosen; nothing changes then.
    pub fn submit_answer(&mut self) -> Result<Step, SessionError> {
        self.ensure_idle_request()?;
        self.ensure_state(SessionState::AwaitingAnswer, "submit an answer")?;
        let Some(selected_index) = self.selection else {
            return Err(SessionError::NoSelection);
        };
        let question = self.current_or_invalid("submit an answer")?.clone();
        let session_id = self.session_id_or_invalid("submit an answer")?;

        let now = self.clock.now();
        let response_seconds = whole_seconds_between(self.shown_at.unwrap_or(now), now);
        let ticket = self.issue(Pending::Answer {
            selected_index,
            response_seconds,
        });

        Ok(Step {
            renders: vec![Render::SubmitEnabled(false)],
            effect: Some(Effect::Evaluate {
                ticket,
                submission: Submission {
                    session_id,
                    question,
                    selected_index,
                    question_index: self.question_index,
                },
            }),
            release: None,
        })
    }

    /// Move past the feedback screen to the next question or the results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `ShowingFeedback`.
    pub fn advance(&mut self) -> Result<Step, SessionError> {
        self.ensure_idle_request()?;
        self.ensure_state(SessionState::ShowingFeedback, "advance")?;

        if self.question_index < TOTAL_QUESTIONS {
            let session_id = self.session_id_or_invalid("advance")?;
            let ticket = self.issue(Pending::Question);
            return Ok(Step {
                renders: Vec::new(),
                effect: Some(Effect::FetchQuestion {
                    ticket,
                    session_id,
                    index: self.question_index,
                }),
                release: None,
            });
        }

        self.timer.stop();
        let summary = SessionSummary::from_answers(&self.answer_log, self.timer.read())?;
        debug_assert_eq!(summary.final_score(), self.score);
        info!(
            generation = %self.generation,
            score = summary.final_score(),
            accuracy = summary.accuracy(),
            time_spent = summary.time_spent(),
            "quiz session complete"
        );
        self.state = SessionState::Complete;
        self.summary = Some(summary.clone());
        Ok(Step {
            renders: vec![Render::Results(summary)],
            effect: None,
            release: self.remote_session_id(),
        })
    }

    /// Start over from the results screen with a fully reset session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Complete`.
    pub fn restart(&mut self) -> Result<Step, SessionError> {
        self.ensure_state(SessionState::Complete, "restart")?;
        self.discard();
        Ok(self.begin())
    }

    /// Leave the quiz from any state, discarding the session.
    pub fn exit(&mut self) -> Step {
        if self.state != SessionState::Idle || self.in_flight.is_some() {
            info!(generation = %self.generation, answered = self.question_index, "quiz session exited");
        }
        let release = self.discard();
        Step {
            renders: vec![Render::Closed],
            effect: None,
            release,
        }
    }

    /// One-second timer tick. Ignored once the timer is stopped.
    pub fn tick(&mut self) -> Step {
        if self.timer.tick() {
            Step::render(vec![Render::Timer(self.timer.format())])
        } else {
            Step::default()
        }
    }

    //
    // ─── COMPLETIONS ───────────────────────────────────────────────────────────
    //

    /// Feed back the result of an effect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Startup` when opening the session failed outright; the
    /// session is back in `Idle` by then.
    pub fn apply(&mut self, completion: Completion) -> Result<Step, SessionError> {
        let ticket = completion.ticket();
        let Some(in_flight) = self.in_flight.filter(|f| f.ticket == ticket) else {
            debug!(
                ticket_generation = %ticket.generation(),
                generation = %self.generation,
                "discarding stale completion"
            );
            return Ok(Step::default());
        };
        self.in_flight = None;

        match (in_flight.pending, completion) {
            (Pending::Open, Completion::SessionOpened { session_id, .. }) => {
                info!(session = %session_id, generation = %self.generation, "quiz session opened");
                self.session_id = Some(session_id.clone());
                let ticket = self.issue(Pending::Question);
                Ok(Step {
                    renders: Vec::new(),
                    effect: Some(Effect::FetchQuestion {
                        ticket,
                        session_id,
                        index: self.question_index,
                    }),
                    release: None,
                })
            }
            (Pending::Open, Completion::Failed { reason, .. }) => {
                warn!(%reason, "quiz session failed to start");
                self.discard();
                Err(SessionError::Startup(reason))
            }
            (Pending::Question, Completion::QuestionLoaded { question, .. }) => {
                Ok(self.show_question(question))
            }
            (Pending::Question, Completion::Failed { reason, .. }) => {
                warn!(%reason, index = self.question_index, "question request failed, using fallback");
                let question = FallbackQuestionSource::question_at(self.question_index);
                Ok(self.show_question(question))
            }
            (
                Pending::Answer {
                    selected_index,
                    response_seconds,
                },
                Completion::AnswerEvaluated { evaluation, .. },
            ) => Ok(self.record_answer(selected_index, response_seconds, evaluation)),
            (
                Pending::Answer {
                    selected_index,
                    response_seconds,
                },
                Completion::Failed { reason, .. },
            ) => {
                warn!(%reason, "answer evaluation failed, using fallback rule");
                let evaluation = self.fallback_evaluation(selected_index)?;
                Ok(self.record_answer(selected_index, response_seconds, evaluation))
            }
            (pending, completion) => {
                warn!(?pending, ?completion, "completion does not match the pending request");
                self.in_flight = Some(in_flight);
                Ok(Step::default())
            }
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn begin(&mut self) -> Step {
        self.discard();
        self.timer.start();
        debug!(generation = %self.generation, "starting quiz session");

        let ticket = self.issue(Pending::Open);
        Step {
            renders: vec![
                Render::Score(0),
                Render::Progress(0),
                Render::Timer(self.timer.format()),
                Render::SubmitEnabled(false),
            ],
            effect: Some(Effect::OpenSession { ticket }),
            release: None,
        }
    }

    /// Drop all session data and invalidate outstanding requests.
    ///
    /// Returns the remote session still open on the service, if any. A completed
    /// session was already released by `advance`.
    fn discard(&mut self) -> Option<SessionId> {
        let release = match self.state {
            SessionState::Complete => None,
            _ => self.remote_session_id(),
        };
        self.generation = self.generation.next();
        self.state = SessionState::Idle;
        self.session_id = None;
        self.question_index = 0;
        self.score = 0;
        self.answer_log.clear();
        self.current = None;
        self.selection = None;
        self.shown_at = None;
        self.in_flight = None;
        self.summary = None;
        self.timer.reset();
        release
    }

    fn remote_session_id(&self) -> Option<SessionId> {
        self.session_id.clone().filter(|id| !id.is_local())
    }

    fn issue(&mut self, pending: Pending) -> Ticket {
        self.next_seq = self.next_seq.wrapping_add(1);
        let ticket = Ticket::new(self.generation, self.next_seq);
        self.in_flight = Some(InFlight { ticket, pending });
        ticket
    }

    fn show_question(&mut self, question: Question) -> Step {
        let progress = Progress::of(self.question_index + 1, TOTAL_QUESTIONS);
        self.current = Some(question.clone());
        self.selection = None;
        self.shown_at = Some(self.clock.now());
        self.state = SessionState::AwaitingAnswer;

        Step::render(vec![
            Render::Question { question, progress },
            Render::Progress(progress.percentage),
            Render::SubmitEnabled(false),
        ])
    }

    fn record_answer(
        &mut self,
        selected_index: usize,
        response_seconds: u32,
        evaluation: Evaluation,
    ) -> Step {
        let Some(question) = self.current.take() else {
            warn!("evaluation arrived without a current question");
            return Step::default();
        };

        self.answer_log.push(AnswerRecord::new(
            question,
            selected_index,
            evaluation.correct,
            response_seconds,
        ));
        self.question_index += 1;
        self.selection = None;
        self.shown_at = None;
        self.state = SessionState::ShowingFeedback;

        let mut renders = Vec::with_capacity(2);
        if evaluation.correct {
            self.score += POINTS_PER_CORRECT;
            renders.push(Render::Score(self.score));
        }
        debug_assert_eq!(self.answer_log.len(), self.question_index as usize);
        debug_assert!(self.question_index <= TOTAL_QUESTIONS);
        debug_assert!(self.score <= MAX_SCORE);

        renders.push(Render::Feedback {
            evaluation,
            score: self.score,
            accuracy: self.accuracy(),
            is_complete: self.question_index >= TOTAL_QUESTIONS,
        });
        Step::render(renders)
    }

    fn fallback_evaluation(&self, selected_index: usize) -> Result<Evaluation, SessionError> {
        let question = self.current_or_invalid("grade an answer")?.clone();
        let session_id = self.session_id_or_invalid("grade an answer")?;
        Ok(FallbackEvaluator::grade(&Submission {
            session_id,
            question,
            selected_index,
            question_index: self.question_index,
        }))
    }

    fn ensure_state(&self, expected: SessionState, action: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    fn ensure_idle_request(&self) -> Result<(), SessionError> {
        if self.in_flight.is_some() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    fn current_or_invalid(&self, action: &'static str) -> Result<&Question, SessionError> {
        self.current.as_ref().ok_or(SessionError::InvalidTransition {
            state: self.state,
            action,
        })
    }

    fn session_id_or_invalid(&self, action: &'static str) -> Result<SessionId, SessionError> {
        self.session_id.clone().ok_or(SessionError::InvalidTransition {
            state: self.state,
            action,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
