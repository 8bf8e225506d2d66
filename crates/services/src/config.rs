use std::env;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::evaluator::{AnswerEvaluator, FallbackEvaluator, RemoteEvaluator};
use crate::remote::QuizApiClient;
use crate::source::{FallbackQuestionSource, QuestionSource, RemoteQuestionSource};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api/quiz";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Which question source / answer evaluator pair a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Ask the quiz service first and fall back to local content on failure.
    #[default]
    Remote,
    /// Never touch the network.
    Local,
}

impl SourceMode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" | "fallback" | "offline" => Ok(Self::Local),
            _ => Err(ConfigError::InvalidMode { raw: raw.into() }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub mode: SourceMode,
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Remote,
            base_url: default_base_url(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Source and evaluator picked once for the lifetime of the client.
#[derive(Clone)]
pub struct Backends {
    pub questions: Arc<dyn QuestionSource>,
    pub evaluator: Arc<dyn AnswerEvaluator>,
}

impl QuizConfig {
    /// Read `QUIZ_SOURCE`, `QUIZ_API_URL` and `QUIZ_TIMEOUT_MS` from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mode = match non_blank("QUIZ_SOURCE") {
            Some(raw) => SourceMode::parse(&raw)?,
            None => SourceMode::default(),
        };
        let base_url = match non_blank("QUIZ_API_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => default_base_url(),
        };
        let request_timeout = match non_blank("QUIZ_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidTimeout { raw })?,
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };

        Ok(Self {
            mode,
            base_url,
            request_timeout,
        })
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the service url.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `raw` is not an absolute url.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    /// Build the question source and answer evaluator for the configured mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Http` if the HTTP client cannot be constructed.
    pub fn build_backends(&self) -> Result<Backends, ConfigError> {
        match self.mode {
            SourceMode::Local => Ok(Backends {
                questions: Arc::new(FallbackQuestionSource::new()),
                evaluator: Arc::new(FallbackEvaluator::new()),
            }),
            SourceMode::Remote => {
                let client = QuizApiClient::new(self.base_url.clone(), self.request_timeout)?;
                Ok(Backends {
                    questions: Arc::new(RemoteQuestionSource::new(client.clone())),
                    evaluator: Arc::new(RemoteEvaluator::new(client)),
                })
            }
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default url is valid"))
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.into(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.mode, SourceMode::Remote);
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(3_000));
    }

    #[test]
    fn reads_all_variables() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_SOURCE", "Local"),
            ("QUIZ_API_URL", "http://quiz.test:8080/api/quiz"),
            ("QUIZ_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.mode, SourceMode::Local);
        assert_eq!(config.base_url.host_str(), Some("quiz.test"));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_SOURCE", "  ")])).unwrap();
        assert_eq!(config.mode, SourceMode::Remote);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            QuizConfig::from_lookup(lookup(&[("QUIZ_SOURCE", "carrier-pigeon")])),
            Err(ConfigError::InvalidMode { .. })
        ));
        assert!(matches!(
            QuizConfig::from_lookup(lookup(&[("QUIZ_API_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            QuizConfig::from_lookup(lookup(&[("QUIZ_TIMEOUT_MS", "soon")])),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }
}
