//! In-process question stores.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use partyq_core::error::GameError;
use partyq_core::query::{QuestionQuery, SortKey};
use partyq_core::question::Language;
use partyq_core::store::{QuestionRow, QuestionStore};

/// Evaluates queries against a fixed list of rows and records every query
/// it receives.
///
/// `SortKey::Random` keeps insertion order so results stay predictable;
/// callers that need shuffling do it themselves with an injected RNG.
#[derive(Debug, Default)]
pub struct InMemoryQuestionStore {
    rows: Vec<QuestionRow>,
    queries: Mutex<Vec<QuestionQuery>>,
}

impl InMemoryQuestionStore {
    /// Creates a store holding `rows`.
    #[must_use]
    pub fn new(rows: Vec<QuestionRow>) -> Self {
        Self {
            rows,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every query passed to `fetch_rows` or `count_rows`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn queries(&self) -> Vec<QuestionQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, query: &QuestionQuery) {
        self.queries.lock().unwrap().push(query.clone());
    }
}

fn compare(a: &QuestionRow, b: &QuestionRow, keys: &[SortKey]) -> Ordering {
    let is_bilingual = |row: &QuestionRow| row.effective_language() == Some(Language::Both);
    keys.iter()
        .map(|key| match key {
            SortKey::BilingualFirst => is_bilingual(b).cmp(&is_bilingual(a)),
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Random => Ordering::Equal,
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn fetch_rows(&self, query: &QuestionQuery) -> Result<Vec<QuestionRow>, GameError> {
        self.record(query);
        let mut matched: Vec<QuestionRow> = self
            .rows
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare(a, b, query.sort()));
        let offset = query.offset().unwrap_or(0) as usize;
        let limit = query.limit().map_or(usize::MAX, |l| l as usize);
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_rows(&self, query: &QuestionQuery) -> Result<u64, GameError> {
        self.record(query);
        Ok(self.rows.iter().filter(|row| query.matches(row)).count() as u64)
    }
}

/// A store whose connection is always down.
#[derive(Debug, Default)]
pub struct FailingQuestionStore;

#[async_trait]
impl QuestionStore for FailingQuestionStore {
    async fn fetch_rows(&self, _query: &QuestionQuery) -> Result<Vec<QuestionRow>, GameError> {
        Err(GameError::StoreUnavailable("connection refused".into()))
    }

    async fn count_rows(&self, _query: &QuestionQuery) -> Result<u64, GameError> {
        Err(GameError::StoreUnavailable("connection refused".into()))
    }
}
