//! The filter capability set.

use std::fmt;
use std::sync::Arc;

use partyq_core::query::QuestionQuery;

/// Broad grouping of filters, used for introspection and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    /// Restricts the corpus to what a game mode can use.
    GameMode,
    /// Restricts by category, type, language or text.
    Content,
    /// Restricts by spice level or length.
    Difficulty,
    /// Shapes the result set: ordering, paging, exclusions.
    Behavior,
    /// Wraps other filters.
    Composite,
}

impl FilterCategory {
    /// Stable string key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GameMode => "game_mode",
            Self::Content => "content",
            Self::Difficulty => "difficulty",
            Self::Behavior => "behavior",
            Self::Composite => "composite",
        }
    }
}

/// A unit that adds one constraint to a question query.
///
/// `apply` must be pure: it returns a new query and never mutates its
/// input, performs no I/O and cannot fail. Applying the same filter twice
/// yields the same query as applying it once.
pub trait QuestionFilter: Send + Sync + fmt::Debug {
    /// Returns `query` with this filter's constraint added.
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery;

    /// Stable key identifying the filter kind.
    fn filter_type(&self) -> &'static str;

    /// Human-readable summary of the constraint.
    fn description(&self) -> String;

    /// The group this filter belongs to.
    fn category(&self) -> FilterCategory;

    /// Wrapped filters, for filters that wrap others.
    fn children(&self) -> &[Arc<dyn QuestionFilter>] {
        &[]
    }
}
