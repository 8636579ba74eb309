//! Behavior filters: ordering, paging and repeat exclusion.
//!
//! Apart from [`NoRepeatFilter`] these change the shape of the result set,
//! not which rows qualify, so they belong at the end of a composite.

use partyq_core::error::GameError;
use partyq_core::query::{Predicate, QuestionQuery, SortKey};

use crate::filter::{FilterCategory, QuestionFilter};

/// Returns rows in random order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderFilter;

impl RandomOrderFilter {
    /// Builds the filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl QuestionFilter for RandomOrderFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_sort(SortKey::Random)
    }

    fn filter_type(&self) -> &'static str {
        "random_order"
    }

    fn description(&self) -> String {
        "Random question order".to_owned()
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Behavior
    }
}

/// Caps the number of rows returned.
#[derive(Debug, Clone, Copy)]
pub struct LimitFilter {
    limit: u32,
}

impl LimitFilter {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if `limit` is zero.
    pub fn new(limit: u32) -> Result<Self, GameError> {
        if limit == 0 {
            return Err(GameError::Configuration(
                "limit must be at least 1".to_owned(),
            ));
        }
        Ok(Self { limit })
    }

    /// The configured cap.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl QuestionFilter for LimitFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_limit(self.limit)
    }

    fn filter_type(&self) -> &'static str {
        "limit"
    }

    fn description(&self) -> String {
        format!("Limit to {} questions", self.limit)
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Behavior
    }
}

/// Skips the first rows, for paging through a stable ordering.
#[derive(Debug, Clone, Copy)]
pub struct OffsetFilter {
    offset: u32,
}

impl OffsetFilter {
    /// Builds the filter. An offset of zero is the identity.
    #[must_use]
    pub fn new(offset: u32) -> Self {
        Self { offset }
    }
}

impl QuestionFilter for OffsetFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        if self.offset == 0 {
            return query.clone();
        }
        query.with_offset(self.offset)
    }

    fn filter_type(&self) -> &'static str {
        "offset"
    }

    fn description(&self) -> String {
        format!("Skip first {} questions", self.offset)
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Behavior
    }
}

/// Excludes questions that were already played.
#[derive(Debug, Clone, Default)]
pub struct NoRepeatFilter {
    excluded_ids: Vec<i64>,
}

impl NoRepeatFilter {
    /// Builds the filter. An empty list is the identity.
    #[must_use]
    pub fn new(excluded_ids: impl IntoIterator<Item = i64>) -> Self {
        let mut excluded_ids: Vec<i64> = excluded_ids.into_iter().collect();
        excluded_ids.sort_unstable();
        excluded_ids.dedup();
        Self { excluded_ids }
    }
}

impl QuestionFilter for NoRepeatFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        if self.excluded_ids.is_empty() {
            return query.clone();
        }
        query.with_predicate(Predicate::IdNotIn(self.excluded_ids.clone()))
    }

    fn filter_type(&self) -> &'static str {
        "no_repeat"
    }

    fn description(&self) -> String {
        format!("Exclude {} recently used questions", self.excluded_ids.len())
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Behavior
    }
}
