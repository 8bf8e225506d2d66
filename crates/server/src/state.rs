use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use quiz_core::model::TOTAL_QUESTIONS;

use crate::bank::BankEntry;
use crate::error::ApiError;

/// Progress of one client's quiz, held in memory until `/complete`.
#[derive(Debug)]
pub struct ServerSession {
    pub questions: Vec<&'static BankEntry>,
    pub current: usize,
    pub score: u32,
    pub correct: u32,
    pub started_at: DateTime<Utc>,
}

impl ServerSession {
    #[must_use]
    pub fn new(questions: Vec<&'static BankEntry>, started_at: DateTime<Utc>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            correct: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&'static BankEntry> {
        self.questions.get(self.current).copied()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(TOTAL_QUESTIONS)
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        u32::try_from(self.current).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    sessions: Arc<Mutex<HashMap<String, ServerSession>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `ApiError::Internal` if a handler panicked while holding the lock.
    pub fn sessions(&self) -> Result<MutexGuard<'_, HashMap<String, ServerSession>>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store poisoned".into()))
    }
}
