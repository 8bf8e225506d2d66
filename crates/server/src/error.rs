use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use quiz_core::wire::ErrorResponse;

/// Rejections returned by the quiz endpoints.
///
/// Every variant renders as `{"success": false, "error": "..."}` so clients can
/// parse failures with the same shape as successes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Quiz already completed")]
    AlreadyComplete,

    #[error("Question ID mismatch")]
    QuestionMismatch,

    #[error("Answer index {index} is out of range")]
    InvalidAnswer { index: usize },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
