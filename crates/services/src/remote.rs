use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use quiz_core::model::{Evaluation, Question, SessionId, SessionSummary};
use quiz_core::wire::{
    AnswerRequest, AnswerResponse, CompleteResponse, QuestionResponse, SessionRequest,
    StartResponse,
};

use crate::error::SourceError;

/// Thin JSON client for the remote quiz service.
///
/// Every call maps an unsuccessful reply to `SourceError`; deciding what to do
/// about it is left to the source/evaluator wrapping the client.
#[derive(Clone, Debug)]
pub struct QuizApiClient {
    client: Client,
    base_url: Url,
}

impl QuizApiClient {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `POST /start`
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure or a rejected start.
    pub async fn start(&self) -> Result<SessionId, SourceError> {
        let body: StartResponse = self.post("start", &serde_json::json!({})).await?;
        if !body.success {
            return Err(rejected(body.error));
        }
        body.session_id
            .filter(|id| !id.trim().is_empty())
            .map(SessionId::new)
            .ok_or(SourceError::MissingField("session_id"))
    }

    /// `POST /question`, annotating the result with `question_number = index + 1`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure, a rejected request or an invalid question.
    pub async fn question(&self, session: &SessionId, index: u32) -> Result<Question, SourceError> {
        if session.is_local() {
            return Err(SourceError::LocalSession);
        }
        let request = SessionRequest {
            session_id: session.as_str().to_owned(),
        };
        let body: QuestionResponse = self.post("question", &request).await?;
        if !body.success {
            return Err(rejected(body.error));
        }
        let wire = body.question.ok_or(SourceError::MissingField("question"))?;
        Ok(wire.into_question(index.saturating_add(1))?)
    }

    /// `POST /answer`
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure or a rejected submission.
    pub async fn answer(
        &self,
        session: &SessionId,
        question: &Question,
        selected_index: usize,
    ) -> Result<Evaluation, SourceError> {
        if session.is_local() {
            return Err(SourceError::LocalSession);
        }
        let request = AnswerRequest {
            session_id: session.as_str().to_owned(),
            question_id: question.id().as_str().to_owned(),
            selected_index,
        };
        let body: AnswerResponse = self.post("answer", &request).await?;
        if !body.success {
            return Err(rejected(body.error));
        }
        let correct_answer_text = body
            .correct_answer
            .ok_or(SourceError::MissingField("correct_answer"))?;

        Ok(Evaluation {
            correct: body.correct,
            correct_answer_text,
            explanation: body.explanation.unwrap_or_default(),
            is_session_complete: body.is_complete,
        })
    }

    /// `POST /complete`: close the session on the service and fetch its summary.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on transport failure or when the service does not
    /// know the session.
    pub async fn complete(&self, session: &SessionId) -> Result<SessionSummary, SourceError> {
        if session.is_local() {
            return Err(SourceError::LocalSession);
        }
        let request = SessionRequest {
            session_id: session.as_str().to_owned(),
        };
        let body: CompleteResponse = self.post("complete", &request).await?;
        if !body.success {
            return Err(rejected(body.error));
        }
        body.summary.ok_or(SourceError::MissingField("summary"))
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, SourceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!(
            "{}/{endpoint}",
            self.base_url.as_str().trim_end_matches('/')
        );
        let response = self.client.post(url).json(body).send().await?;

        // The service answers rejected calls with 400 and a JSON `error`; surface that text.
        let status = response.status();
        if !(status.is_success() || status.is_client_error()) {
            return Err(SourceError::HttpStatus(status));
        }
        match response.json::<R>().await {
            Ok(body) => Ok(body),
            Err(_) if !status.is_success() => Err(SourceError::HttpStatus(status)),
            Err(err) => Err(err.into()),
        }
    }
}

fn rejected(error: Option<String>) -> SourceError {
    SourceError::Rejected(error.unwrap_or_else(|| "unsuccessful response".into()))
}
