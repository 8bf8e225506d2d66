use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use services::session::surface;
use services::{Completion, Presenter, QuizSession, Render, SessionError, SessionLoop, Step};

use crate::command::{Command, HELP};
use crate::presenter::TerminalPresenter;

/// Interactive front end: owns the session and feeds it user intents, timer
/// ticks and request completions from a single task.
///
/// Effects run on spawned tasks and report back over a channel, so the timer
/// keeps ticking and input stays responsive while a request is in flight.
pub struct Shell<W: Write> {
    runner: SessionLoop,
    session: QuizSession,
    presenter: TerminalPresenter<W>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<W: Write> Shell<W> {
    pub fn new(runner: SessionLoop, session: QuizSession, out: W) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            runner,
            session,
            presenter: TerminalPresenter::new(out),
            completions_tx,
            completions_rx,
        }
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input fails.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.presenter
            .print("Quiz ready. Type `start` to begin or `help` for commands.");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match Command::parse(&line) {
                        Some(Command::Quit) => break,
                        Some(cmd) => self.handle(cmd),
                        None => self.presenter.print("Unknown command. Type `help` for a list."),
                    }
                }
                _ = ticker.tick() => {
                    let step = self.session.tick();
                    self.dispatch(Ok(step));
                }
                Some(completion) = self.completions_rx.recv() => {
                    let result = self.session.apply(completion);
                    self.dispatch(result);
                }
            }
        }

        // Close the remote session before the runtime goes away.
        let mut step = self.session.exit();
        if let Some(session_id) = step.release.take() {
            self.runner.release(session_id).await;
        }
        self.dispatch(Ok(step));
        Ok(())
    }

    fn handle(&mut self, cmd: Command) {
        let result = match cmd {
            Command::Start => self.session.start_session(),
            Command::Select(index) => self.session.select_option(index),
            Command::Submit => self.session.submit_answer(),
            Command::Next => self.session.advance(),
            Command::Restart => self.session.restart(),
            Command::Exit => Ok(self.session.exit()),
            Command::Status => {
                self.presenter.print_status();
                return;
            }
            Command::Help => {
                self.presenter.print(HELP);
                return;
            }
            Command::Quit => return,
        };
        self.dispatch(result);
    }

    /// Present a step and hand its effect and any session release to background tasks.
    fn dispatch(&mut self, result: Result<Step, SessionError>) {
        let mut step = match surface(result, &mut self.presenter) {
            Ok(step) => step,
            Err(err) => {
                debug!(error = %err, "intent rejected");
                if let Some(hint) = hint_for(&err) {
                    self.presenter.present(Render::Alert(hint.into()));
                }
                return;
            }
        };

        for render in step.renders.drain(..) {
            self.presenter.present(render);
        }
        if let Some(session_id) = step.release.take() {
            let runner = self.runner.clone();
            tokio::spawn(async move { runner.release(session_id).await });
        }
        if let Some(effect) = step.effect.take() {
            let runner = self.runner.clone();
            let tx = self.completions_tx.clone();
            tokio::spawn(async move {
                let completion = runner.resolve(effect).await;
                if tx.send(completion).is_err() {
                    debug!("shell gone before request finished");
                }
            });
        }
    }
}

/// Short guidance for rejections `surface` leaves silent.
fn hint_for(err: &SessionError) -> Option<&'static str> {
    match err {
        SessionError::Busy => Some("Still waiting for the quiz service..."),
        SessionError::InvalidOption { .. } => Some("That option does not exist."),
        SessionError::InvalidTransition { .. } => Some("That command is not available right now."),
        _ => None,
    }
}
