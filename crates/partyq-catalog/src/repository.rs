//! Filtered access to the question store.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use partyq_core::error::GameError;
use partyq_core::query::QuestionQuery;
use partyq_core::question::Question;
use partyq_core::store::{QuestionRow, QuestionStore};
use partyq_filters::{FilterComposite, QuestionFilter};

use crate::mapping::to_question;
use crate::stats::QuestionStats;

/// What to do when a composite matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// An empty batch is a valid answer.
    #[default]
    AllowEmpty,
    /// An empty batch is `GameError::NoMatchingQuestions`.
    RequireNonEmpty,
}

/// Validated questions plus the rows that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBatch {
    /// Questions in the order the query produced them.
    pub questions: Vec<Question>,
    /// Ids of rows the store returned that could not be mapped.
    pub discarded: Vec<i64>,
}

impl QuestionBatch {
    /// Rows the store returned, valid or not.
    #[must_use]
    pub fn rows_fetched(&self) -> usize {
        self.questions.len() + self.discarded.len()
    }
}

/// The only component allowed to query the question store.
///
/// Results keep the order the composed query produced. Store failures are
/// returned as they are, without retries.
#[derive(Clone)]
pub struct QuestionRepository {
    store: Arc<dyn QuestionStore>,
}

impl fmt::Debug for QuestionRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionRepository").finish_non_exhaustive()
    }
}

impl QuestionRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    fn build_query(filters: &FilterComposite) -> Result<QuestionQuery, GameError> {
        let issues = filters.validate();
        if !issues.is_empty() {
            return Err(GameError::Configuration(issues.join("; ")));
        }
        Ok(filters.apply(&QuestionQuery::new()))
    }

    /// Runs the composite and returns the rows untouched.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the composite fails validation,
    /// or `GameError::StoreUnavailable` if the store query fails.
    #[instrument(skip_all, fields(filters = %filters.description()))]
    pub async fn get_questions_raw(
        &self,
        filters: &FilterComposite,
    ) -> Result<Vec<QuestionRow>, GameError> {
        let query = Self::build_query(filters)?;
        let rows = self.store.fetch_rows(&query).await?;
        debug!(rows = rows.len(), "fetched raw question rows");
        Ok(rows)
    }

    /// Runs the composite and maps each row into a [`Question`], dropping
    /// rows that fail validation.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the composite fails validation,
    /// `GameError::StoreUnavailable` if the store query fails, or
    /// `GameError::NoMatchingQuestions` if no valid question remains and
    /// `mode` is [`RetrievalMode::RequireNonEmpty`].
    #[instrument(skip_all, fields(filters = %filters.description(), mode = ?mode))]
    pub async fn get_questions(
        &self,
        filters: &FilterComposite,
        mode: RetrievalMode,
    ) -> Result<QuestionBatch, GameError> {
        let query = Self::build_query(filters)?;
        let rows = self.store.fetch_rows(&query).await?;

        let mut batch = QuestionBatch::default();
        for row in &rows {
            match to_question(row) {
                Ok(question) => batch.questions.push(question),
                Err(reason) => {
                    batch.discarded.push(row.id);
                    warn!(question_id = row.id, reason = ?reason, "discarding invalid question row");
                }
            }
        }
        debug!(
            questions = batch.questions.len(),
            discarded = batch.discarded.len(),
            "mapped question rows"
        );

        if batch.questions.is_empty() && mode == RetrievalMode::RequireNonEmpty {
            return Err(GameError::NoMatchingQuestions {
                requested: query.limit().map_or(1, |l| l as usize),
                available: 0,
            });
        }
        Ok(batch)
    }

    /// Counts rows the composite selects, ignoring ordering and paging.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the composite fails validation,
    /// or `GameError::StoreUnavailable` if the store query fails.
    pub async fn count_questions(&self, filters: &FilterComposite) -> Result<u64, GameError> {
        let query = Self::build_query(filters)?;
        self.store.count_rows(&query.selection_only()).await
    }

    /// Distinct, lowercased categories among the rows the composite
    /// selects, sorted. Uncategorized rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the composite fails validation,
    /// or `GameError::StoreUnavailable` if the store query fails.
    pub async fn available_categories(
        &self,
        filters: &FilterComposite,
    ) -> Result<Vec<String>, GameError> {
        let query = Self::build_query(filters)?;
        let rows = self.store.fetch_rows(&query.selection_only()).await?;
        let categories: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.category.as_deref())
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Row counts by type, spice, language and category among the rows the
    /// composite selects.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the composite fails validation,
    /// or `GameError::StoreUnavailable` if the store query fails.
    pub async fn question_stats(
        &self,
        filters: &FilterComposite,
    ) -> Result<QuestionStats, GameError> {
        let query = Self::build_query(filters)?;
        let rows = self.store.fetch_rows(&query.selection_only()).await?;
        Ok(QuestionStats::from_rows(&rows))
    }
}

#[cfg(test)]
mod tests {
    use partyq_core::query::{Predicate, SortKey};
    use partyq_core::question::{QuestionType, SpiceLevel};
    use partyq_filters::{
        CategoryFilter, GameModeFilter, LanguageFilter, LimitFilter, RandomOrderFilter,
        SpiceFilter,
    };
    use partyq_test_support::{
        FailingQuestionStore, InMemoryQuestionStore, corpus, question_row,
    };

    use super::*;

    fn repository_over(rows: Vec<QuestionRow>) -> (QuestionRepository, Arc<InMemoryQuestionStore>) {
        let store = Arc::new(InMemoryQuestionStore::new(rows));
        (QuestionRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_get_questions_maps_rows_in_query_order() {
        // Arrange
        let mut rows = corpus(2, 2, "mild");
        rows.push(question_row(5, "truth", "spicy", "en"));
        let (repo, store) = repository_over(rows);
        let filters = FilterComposite::new()
            .with(GameModeFilter::truth_only())
            .with(SpiceFilter::new("mild").unwrap())
            .with(RandomOrderFilter::new());

        // Act
        let batch = repo
            .get_questions(&filters, RetrievalMode::AllowEmpty)
            .await
            .unwrap();

        // Assert
        let ids: Vec<i64> = batch.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(batch.discarded.is_empty());
        let sent = &store.queries()[0];
        assert_eq!(
            sent.predicates(),
            &[
                Predicate::TypeIn(vec![QuestionType::Truth]),
                Predicate::SpiceIn(vec![SpiceLevel::Mild]),
            ]
        );
        assert_eq!(sent.sort(), &[SortKey::Random]);
    }

    #[tokio::test]
    async fn test_get_questions_records_discarded_rows() {
        // Arrange
        let mut broken = question_row(3, "truth", "mild", "en");
        broken.text_en = None;
        let mut rows = corpus(2, 0, "mild");
        rows.push(broken);
        let (repo, _) = repository_over(rows);

        // Act
        let batch = repo
            .get_questions(&FilterComposite::new(), RetrievalMode::AllowEmpty)
            .await
            .unwrap();

        // Assert
        assert_eq!(batch.questions.len(), 2);
        assert_eq!(batch.discarded, vec![3]);
        assert_eq!(batch.rows_fetched(), 3);
    }

    #[tokio::test]
    async fn test_english_filter_keeps_legacy_and_untagged_rows() {
        // Arrange
        let mut legacy = question_row(1, "truth", "mild", "en");
        legacy.language = Some("EN_Only".to_owned());
        let mut untagged = question_row(2, "truth", "mild", "en");
        untagged.language = None;
        let (repo, _) = repository_over(vec![
            legacy,
            untagged,
            question_row(3, "truth", "mild", "se"),
        ]);
        let filters = FilterComposite::new().with(LanguageFilter::new("en").unwrap());

        // Act
        let batch = repo
            .get_questions(&filters, RetrievalMode::RequireNonEmpty)
            .await
            .unwrap();

        // Assert
        let ids: Vec<i64> = batch.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(batch.discarded.is_empty());
    }

    #[tokio::test]
    async fn test_require_non_empty_fails_on_zero_matches() {
        // Arrange
        let (repo, _) = repository_over(corpus(3, 0, "mild"));
        let filters = FilterComposite::new()
            .with(GameModeFilter::dare_only())
            .with(LimitFilter::new(4).unwrap());

        // Act
        let result = repo
            .get_questions(&filters, RetrievalMode::RequireNonEmpty)
            .await;

        // Assert
        match result.unwrap_err() {
            GameError::NoMatchingQuestions {
                requested,
                available,
            } => {
                assert_eq!(requested, 4);
                assert_eq!(available, 0);
            }
            other => panic!("expected NoMatchingQuestions, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_allow_empty_returns_empty_batch() {
        let (repo, _) = repository_over(Vec::new());

        let batch = repo
            .get_questions(&FilterComposite::new(), RetrievalMode::AllowEmpty)
            .await
            .unwrap();

        assert!(batch.questions.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let repo = QuestionRepository::new(Arc::new(FailingQuestionStore));

        let result = repo.get_questions_raw(&FilterComposite::new()).await;

        match result.unwrap_err() {
            GameError::StoreUnavailable(_) => {}
            other => panic!("expected StoreUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_conflicting_game_modes_are_rejected_before_querying() {
        let (repo, store) = repository_over(corpus(1, 1, "mild"));
        let filters = FilterComposite::new()
            .with(GameModeFilter::truth_only())
            .with(GameModeFilter::dare_only());

        let result = repo.get_questions_raw(&filters).await;

        assert!(matches!(result, Err(GameError::Configuration(_))));
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn test_count_questions_ignores_limit() {
        let (repo, store) = repository_over(corpus(4, 4, "mild"));
        let filters = FilterComposite::new()
            .with(GameModeFilter::dare_only())
            .with(LimitFilter::new(2).unwrap());

        let count = repo.count_questions(&filters).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(store.queries()[0].limit(), None);
    }

    #[tokio::test]
    async fn test_available_categories_are_distinct_and_sorted() {
        let mut rows = corpus(3, 0, "mild");
        rows[0].category = Some("Romance".into());
        rows[1].category = None;
        let (repo, _) = repository_over(rows);

        let categories = repo
            .available_categories(&FilterComposite::new())
            .await
            .unwrap();

        assert_eq!(categories, vec!["party".to_owned(), "romance".to_owned()]);
    }

    #[tokio::test]
    async fn test_question_stats_respect_filters() {
        let mut rows = corpus(2, 3, "mild");
        rows[0].category = Some("romance".into());
        let (repo, _) = repository_over(rows);
        let filters = FilterComposite::new().with(CategoryFilter::new(["party"]).unwrap());

        let stats = repo.question_stats(&filters).await.unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_type["dare"], 3);
        assert_eq!(stats.by_type["truth"], 1);
    }
}
