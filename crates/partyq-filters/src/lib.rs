//! partyq — composable question filters.
//!
//! Every filter implements [`QuestionFilter`]: it takes a
//! [`QuestionQuery`](partyq_core::query::QuestionQuery) and returns a new one
//! carrying its constraint. Parameters are validated when a filter is
//! built, so applying a filter cannot fail. [`FilterComposite`] chains
//! filters in insertion order and is itself a filter.

pub mod behavior;
pub mod composite;
pub mod content;
pub mod difficulty;
pub mod filter;
pub mod game_mode;

pub use behavior::{LimitFilter, NoRepeatFilter, OffsetFilter, RandomOrderFilter};
pub use composite::FilterComposite;
pub use content::{
    CategoryFilter, ExcludeCategoryFilter, KeywordFilter, LanguageFilter, QuestionTypeFilter,
};
pub use difficulty::{MaxLengthFilter, SpiceFilter};
pub use filter::{FilterCategory, QuestionFilter};
pub use game_mode::GameModeFilter;
