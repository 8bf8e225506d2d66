mod effect;
mod machine;
mod progress;
mod render;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use effect::{Completion, Effect, Step, Ticket};
pub use machine::{QuizSession, SessionState};
pub use progress::Progress;
pub use render::{Presenter, Render};
pub use workflow::{
    NO_SELECTION_PROMPT, STARTUP_FAILURE_ALERT, SessionLoop, present_all, surface,
};
