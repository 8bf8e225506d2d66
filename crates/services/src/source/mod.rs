//! Where session ids and questions come from.

mod fallback;
mod remote;

use async_trait::async_trait;

use quiz_core::model::{Question, SessionId};

use crate::error::SourceError;

pub use fallback::FallbackQuestionSource;
pub use remote::RemoteQuestionSource;

/// Contract for obtaining session ids and questions.
///
/// `request_question` is infallible: implementations degrade to local content
/// instead of surfacing failures.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Open a new session and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the identifier cannot be obtained; callers are
    /// expected to continue with `SessionId::local()`.
    async fn open_session(&self) -> Result<SessionId, SourceError>;

    /// Return the question for the 0-based `index` of `session`.
    async fn request_question(&self, session: &SessionId, index: u32) -> Question;

    /// Tell the issuer that `session` is finished with. Best effort; the default
    /// has nothing to release.
    async fn close_session(&self, _session: &SessionId) {}
}
