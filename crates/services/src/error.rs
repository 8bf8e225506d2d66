//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SummaryError};

use crate::session::SessionState;

/// Why a remote question source or answer evaluator could not be used.
///
/// Never crosses the source/evaluator boundary: callers log it and substitute
/// fallback content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("session id was minted locally; remote service not consulted")]
    LocalSession,
    #[error("quiz service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("quiz service rejected the request: {0}")]
    Rejected(String),
    #[error("quiz service response is missing `{0}`")]
    MissingField(&'static str),
    #[error("quiz service sent an invalid question: {0}")]
    InvalidPayload(#[from] QuestionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no option selected")]
    NoSelection,
    #[error("a request is already in flight")]
    Busy,
    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },
    #[error("option {index} is out of range for {count} options")]
    InvalidOption { index: usize, count: usize },
    #[error("failed to start quiz: {0}")]
    Startup(String),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Errors emitted while reading quiz configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid quiz service url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid timeout {raw}: expected milliseconds")]
    InvalidTimeout { raw: String },
    #[error("unknown question source mode {raw}: expected `remote` or `local`")]
    InvalidMode { raw: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
