use std::num::NonZeroU32;
use std::sync::LazyLock;

use async_trait::async_trait;
use tracing::error;

use quiz_core::model::{
    MAX_OPTIONS, MIN_OPTIONS, Question, QuestionError, QuestionId, SessionId,
};

use super::QuestionSource;
use crate::error::SourceError;

pub(crate) struct CatalogItem {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub subject: &'static str,
    pub difficulty: u8,
}

impl CatalogItem {
    /// Compile-time counterpart of the checks in `Question::new`.
    const fn is_valid(&self) -> bool {
        !self.text.trim_ascii().is_empty()
            && self.options.len() >= MIN_OPTIONS
            && self.options.len() <= MAX_OPTIONS
            && self.difficulty >= 1
            && self.difficulty <= 3
    }

    fn to_question(&self) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            self.text,
            self.options.iter().map(|o| (*o).to_string()).collect(),
            self.subject,
            self.difficulty,
            1,
        )
    }
}

const fn catalog_is_valid(items: &[CatalogItem]) -> bool {
    if items.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < items.len() {
        if !items[i].is_valid() {
            return false;
        }
        i += 1;
    }
    true
}

/// Canned questions served when the quiz service is unavailable.
///
/// The first option of every item is the right one, matching the fallback grading rule.
pub(crate) const FALLBACK_CATALOG: &[CatalogItem] = &[
    CatalogItem {
        id: "mock_1",
        text: "What is 15 + 27?",
        options: &["42", "32", "52", "37"],
        subject: "Mathematics",
        difficulty: 1,
    },
    CatalogItem {
        id: "mock_2",
        text: "Solve for x: 2x + 5 = 15",
        options: &["x = 5", "x = 10", "x = 7.5", "x = 20"],
        subject: "Mathematics",
        difficulty: 2,
    },
    CatalogItem {
        id: "mock_3",
        text: "What is the derivative of x²?",
        options: &["2x", "x", "x²", "2"],
        subject: "Mathematics",
        difficulty: 3,
    },
    CatalogItem {
        id: "mock_4",
        text: "Which planet is closest to the Sun?",
        options: &["Mercury", "Venus", "Mars", "Earth"],
        subject: "Science",
        difficulty: 1,
    },
    CatalogItem {
        id: "mock_5",
        text: "What is the atomic number of Oxygen?",
        options: &["8", "6", "16", "10"],
        subject: "Science",
        difficulty: 2,
    },
    CatalogItem {
        id: "mock_6",
        text: "What is the capital of France?",
        options: &["Paris", "London", "Berlin", "Madrid"],
        subject: "General Knowledge",
        difficulty: 1,
    },
];

const _: () = assert!(
    catalog_is_valid(FALLBACK_CATALOG),
    "fallback catalog must be non-empty and hold only valid questions"
);

static CATALOG: LazyLock<Vec<Question>> = LazyLock::new(|| {
    FALLBACK_CATALOG
        .iter()
        .filter_map(|item| {
            item.to_question()
                .inspect_err(|err| error!(id = item.id, error = %err, "skipping fallback question"))
                .ok()
        })
        .collect()
});

/// Deterministic, stateless source cycling through `FALLBACK_CATALOG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackQuestionSource;

impl FallbackQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Number of distinct questions available.
    #[must_use]
    pub fn catalog_len() -> usize {
        CATALOG.len()
    }

    /// Question for the 0-based `index`, wrapping around the catalog.
    #[must_use]
    pub fn question_at(index: u32) -> Question {
        let slot = usize::try_from(index).unwrap_or(usize::MAX) % CATALOG.len();
        CATALOG[slot]
            .clone()
            .renumbered(NonZeroU32::MIN.saturating_add(index))
    }
}

#[async_trait]
impl QuestionSource for FallbackQuestionSource {
    async fn open_session(&self) -> Result<SessionId, SourceError> {
        Ok(SessionId::local())
    }

    async fn request_question(&self, _session: &SessionId, index: u32) -> Question {
        Self::question_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_catalog_item_is_a_valid_question() {
        assert_eq!(FallbackQuestionSource::catalog_len(), FALLBACK_CATALOG.len());
        for item in FALLBACK_CATALOG {
            assert!(item.to_question().is_ok(), "{} is invalid", item.id);
        }
    }

    #[test]
    fn const_check_rejects_malformed_items() {
        let blank = CatalogItem {
            id: "x",
            text: "  ",
            options: &["a", "b"],
            subject: "Science",
            difficulty: 1,
        };
        let single = CatalogItem {
            id: "y",
            text: "?",
            options: &["a"],
            subject: "Science",
            difficulty: 1,
        };
        assert!(!blank.is_valid());
        assert!(!single.is_valid());
        assert!(!catalog_is_valid(&[]));
    }

    #[test]
    fn covers_every_subject_area() {
        let subjects: HashSet<_> = FALLBACK_CATALOG.iter().map(|item| item.subject).collect();
        assert!(subjects.contains("Mathematics"));
        assert!(subjects.contains("Science"));
        assert!(subjects.contains("General Knowledge"));
    }

    #[test]
    fn wraps_by_index_modulo_catalog_size() {
        let len = u32::try_from(FallbackQuestionSource::catalog_len()).unwrap();
        let first = FallbackQuestionSource::question_at(0);
        let wrapped = FallbackQuestionSource::question_at(len);

        assert_eq!(first.id(), wrapped.id());
        assert_eq!(first.question_number(), 1);
        assert_eq!(wrapped.question_number(), len + 1);
    }

    #[tokio::test]
    async fn opens_local_sessions() {
        let source = FallbackQuestionSource::new();
        let id = source.open_session().await.unwrap();
        assert!(id.is_local());
        let q = source.request_question(&id, 9).await;
        assert_eq!(q.question_number(), 10);
    }
}
