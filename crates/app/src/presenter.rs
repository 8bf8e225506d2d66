use std::io::Write;

use services::{Presenter, Render};

/// Writes render instructions as plain text.
///
/// Timer, score and progress updates only refresh the status line; it is printed
/// with each question and on demand.
pub struct TerminalPresenter<W: Write> {
    out: W,
    timer: String,
    score: u32,
    progress: u8,
    submit_enabled: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timer: "00:00".into(),
            score: 0,
            progress: 0,
            submit_enabled: false,
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "Score: {}  Progress: {}%  Time: {}",
            self.score, self.progress, self.timer
        )
    }

    pub fn print_status(&mut self) {
        let line = self.status_line();
        self.line(&line);
    }

    pub fn print(&mut self, text: &str) {
        self.line(text);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    // Terminal output is best effort; a closed stdout is not worth crashing over.
    fn line(&mut self, text: &str) {
        if writeln!(self.out, "{text}").is_err() {
            tracing::debug!("stdout closed");
        }
    }
}

fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'a'.checked_add(i))
        .map_or('?', char::from)
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, render: Render) {
        match render {
            Render::Question { question, progress } => {
                self.progress = progress.percentage;
                self.line("");
                self.line(&format!(
                    "Question {}/{}  [{} | {}]",
                    progress.current,
                    progress.total,
                    question.subject(),
                    question.difficulty_level()
                ));
                self.line(question.text());
                for (i, option) in question.options().iter().enumerate() {
                    self.line(&format!("  {}) {option}", option_label(i)));
                }
                self.print_status();
            }
            Render::Feedback {
                evaluation,
                score,
                accuracy,
                is_complete,
            } => {
                self.score = score;
                if evaluation.correct {
                    self.line("Correct!");
                } else {
                    self.line(&format!(
                        "Incorrect. The correct answer is: {}",
                        evaluation.correct_answer_text
                    ));
                }
                if !evaluation.explanation.is_empty() {
                    self.line(&evaluation.explanation);
                }
                self.line(&format!("Score: {score}  Accuracy: {accuracy}%"));
                if is_complete {
                    self.line("Type `next` to see your results.");
                } else {
                    self.line("Type `next` for the next question.");
                }
            }
            Render::Results(summary) => {
                self.line("");
                self.line("Quiz complete!");
                self.line(&format!(
                    "  Correct:   {}/{}",
                    summary.correct_count(),
                    summary.total_questions()
                ));
                self.line(&format!("  Score:     {}", summary.final_score()));
                self.line(&format!("  Accuracy:  {}%", summary.accuracy()));
                self.line(&format!("  Level:     {}", summary.level_achieved()));
                self.line(&format!("  Time:      {}", summary.time_spent()));
                self.line("Type `restart` to play again or `exit` to close.");
            }
            Render::Timer(display) => self.timer = display,
            Render::Score(score) => self.score = score,
            Render::Progress(pct) => self.progress = pct,
            Render::SubmitEnabled(enabled) => {
                if enabled && !self.submit_enabled {
                    self.line("Type `submit` to lock in your answer.");
                }
                self.submit_enabled = enabled;
            }
            Render::Alert(message) => self.line(&format!("! {message}")),
            Render::Closed => {
                self.timer = "00:00".into();
                self.score = 0;
                self.progress = 0;
                self.submit_enabled = false;
                self.line("Quiz closed. Type `start` to begin again.");
            }
        }
    }
}
