//! Game-mode filters.

use partyq_core::query::{Predicate, QuestionQuery};
use partyq_core::question::QuestionType;

use crate::filter::{FilterCategory, QuestionFilter};

/// Restricts the corpus to the question types a game mode plays with.
#[derive(Debug, Clone)]
pub struct GameModeFilter {
    mode: &'static str,
    types: Vec<QuestionType>,
}

impl GameModeFilter {
    /// Truths and dares.
    #[must_use]
    pub fn truth_or_dare() -> Self {
        Self {
            mode: "truth_or_dare",
            types: vec![QuestionType::Truth, QuestionType::Dare],
        }
    }

    /// Truths only.
    #[must_use]
    pub fn truth_only() -> Self {
        Self {
            mode: "truth_only",
            types: vec![QuestionType::Truth],
        }
    }

    /// Dares only.
    #[must_use]
    pub fn dare_only() -> Self {
        Self {
            mode: "dare_only",
            types: vec![QuestionType::Dare],
        }
    }

    /// The game-mode key this filter serves.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        self.mode
    }

    /// Question types the mode accepts.
    #[must_use]
    pub fn question_types(&self) -> &[QuestionType] {
        &self.types
    }
}

impl QuestionFilter for GameModeFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::TypeIn(self.types.clone()))
    }

    fn filter_type(&self) -> &'static str {
        "game_mode"
    }

    fn description(&self) -> String {
        let types: Vec<&str> = self.types.iter().map(|t| t.as_str()).collect();
        format!("Game mode {}: {} questions", self.mode, types.join(" and "))
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::GameMode
    }
}
