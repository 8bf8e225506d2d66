use async_trait::async_trait;
use tracing::{debug, warn};

use quiz_core::model::{Question, SessionId};

use super::{FallbackQuestionSource, QuestionSource};
use crate::error::SourceError;
use crate::remote::QuizApiClient;

/// Asks the quiz service for questions, substituting fallback content on any failure.
#[derive(Clone, Debug)]
pub struct RemoteQuestionSource {
    client: QuizApiClient,
}

impl RemoteQuestionSource {
    #[must_use]
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionSource for RemoteQuestionSource {
    async fn open_session(&self) -> Result<SessionId, SourceError> {
        self.client.start().await
    }

    async fn request_question(&self, session: &SessionId, index: u32) -> Question {
        match self.client.question(session, index).await {
            Ok(question) => question,
            Err(SourceError::LocalSession) => FallbackQuestionSource::question_at(index),
            Err(err) => {
                warn!(%session, index, error = %err, "question source unavailable, using fallback");
                FallbackQuestionSource::question_at(index)
            }
        }
    }

    async fn close_session(&self, session: &SessionId) {
        match self.client.complete(session).await {
            Ok(summary) => {
                debug!(%session, score = summary.final_score(), "remote session closed");
            }
            Err(SourceError::LocalSession) => {}
            Err(err) => warn!(%session, error = %err, "could not close remote session"),
        }
    }
}
