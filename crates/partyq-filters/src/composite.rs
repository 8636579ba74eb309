//! Ordered conjunction of filters.

use std::sync::Arc;

use partyq_core::query::QuestionQuery;
use tracing::{debug, warn};

use crate::filter::{FilterCategory, QuestionFilter};

/// Applies its member filters in insertion order, each one to the output
/// of the previous. A composite is itself a filter and may be nested.
#[derive(Debug, Clone, Default)]
pub struct FilterComposite {
    filters: Vec<Arc<dyn QuestionFilter>>,
}

impl FilterComposite {
    /// An empty composite. Applying it returns the query unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with<F: QuestionFilter + 'static>(mut self, filter: F) -> Self {
        self.push(filter);
        self
    }

    /// Adds a filter that is already shared elsewhere.
    #[must_use]
    pub fn with_shared(mut self, filter: Arc<dyn QuestionFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends a filter to the end of the chain.
    pub fn push<F: QuestionFilter + 'static>(&mut self, filter: F) {
        self.filters.push(Arc::new(filter));
    }

    /// Number of direct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the composite has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Direct members, in application order.
    #[must_use]
    pub fn filters(&self) -> &[Arc<dyn QuestionFilter>] {
        &self.filters
    }

    /// Direct members with the given `filter_type` key.
    #[must_use]
    pub fn filters_by_type(&self, filter_type: &str) -> Vec<Arc<dyn QuestionFilter>> {
        self.filters
            .iter()
            .filter(|f| f.filter_type() == filter_type)
            .cloned()
            .collect()
    }

    /// Whether any direct member has the given `filter_type` key.
    #[must_use]
    pub fn has_filter_type(&self, filter_type: &str) -> bool {
        self.filters.iter().any(|f| f.filter_type() == filter_type)
    }

    /// Reports structural problems, such as more than one game-mode filter
    /// anywhere in the tree. An empty list means the composite is sound.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let game_modes = count_category(&self.filters, FilterCategory::GameMode);
        if game_modes > 1 {
            issues.push(format!(
                "composite holds {game_modes} game mode filters, expected at most one"
            ));
        }
        for issue in &issues {
            warn!(issue = %issue, "filter composite failed validation");
        }
        issues
    }
}

fn count_category(filters: &[Arc<dyn QuestionFilter>], category: FilterCategory) -> usize {
    filters
        .iter()
        .map(|f| usize::from(f.category() == category) + count_category(f.children(), category))
        .sum()
}

impl QuestionFilter for FilterComposite {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        let result = self
            .filters
            .iter()
            .fold(query.clone(), |acc, filter| filter.apply(&acc));
        debug!(
            filters = self.filters.len(),
            predicates = result.predicates().len(),
            "applied filter composite"
        );
        result
    }

    fn filter_type(&self) -> &'static str {
        "composite"
    }

    fn description(&self) -> String {
        if self.filters.is_empty() {
            return "Empty composite filter".to_owned();
        }
        self.filters
            .iter()
            .map(|f| f.description())
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Composite
    }

    fn children(&self) -> &[Arc<dyn QuestionFilter>] {
        &self.filters
    }
}
