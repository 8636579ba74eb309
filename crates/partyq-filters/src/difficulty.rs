//! Difficulty filters: spice level and question length.

use partyq_core::error::GameError;
use partyq_core::query::{Predicate, QuestionQuery};
use partyq_core::question::SpiceLevel;

use crate::filter::{FilterCategory, QuestionFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpiceMatch {
    Exactly,
    AtMost(SpiceLevel),
}

/// Keeps questions of the selected spice levels.
#[derive(Debug, Clone)]
pub struct SpiceFilter {
    levels: Vec<SpiceLevel>,
    mode: SpiceMatch,
}

impl SpiceFilter {
    /// Keeps only questions of exactly `level`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if `level` is not `mild`, `medium`
    /// or `spicy`.
    pub fn new(level: &str) -> Result<Self, GameError> {
        Ok(Self::exactly(level.parse()?))
    }

    /// Keeps only questions of exactly `level`.
    #[must_use]
    pub fn exactly(level: SpiceLevel) -> Self {
        Self {
            levels: vec![level],
            mode: SpiceMatch::Exactly,
        }
    }

    /// Keeps questions of any of the listed levels.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the list is empty or holds an
    /// unknown level.
    pub fn any_of<I, S>(levels: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for level in levels {
            let level: SpiceLevel = level.as_ref().parse()?;
            if !parsed.contains(&level) {
                parsed.push(level);
            }
        }
        if parsed.is_empty() {
            return Err(GameError::Configuration(
                "spice filter needs at least one level".to_owned(),
            ));
        }
        parsed.sort_unstable();
        Ok(Self {
            levels: parsed,
            mode: SpiceMatch::Exactly,
        })
    }

    /// Keeps questions up to and including `level`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for an unknown level.
    pub fn at_most(level: &str) -> Result<Self, GameError> {
        let ceiling: SpiceLevel = level.parse()?;
        Ok(Self {
            levels: SpiceLevel::ALL
                .into_iter()
                .filter(|l| *l <= ceiling)
                .collect(),
            mode: SpiceMatch::AtMost(ceiling),
        })
    }

    /// Selected levels, ascending.
    #[must_use]
    pub fn levels(&self) -> &[SpiceLevel] {
        &self.levels
    }
}

impl QuestionFilter for SpiceFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::SpiceIn(self.levels.clone()))
    }

    fn filter_type(&self) -> &'static str {
        "spice"
    }

    fn description(&self) -> String {
        match self.mode {
            SpiceMatch::AtMost(ceiling) => format!("Spice level: up to {ceiling}"),
            SpiceMatch::Exactly => {
                let names: Vec<&str> = self.levels.iter().map(|l| l.as_str()).collect();
                format!("Spice level: {}", names.join(", "))
            }
        }
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Difficulty
    }
}

/// Keeps questions short enough to read out quickly.
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthFilter {
    max_chars: u32,
}

impl MaxLengthFilter {
    /// Builds the filter.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if `max_chars` is zero.
    pub fn new(max_chars: u32) -> Result<Self, GameError> {
        if max_chars == 0 {
            return Err(GameError::Configuration(
                "max length must be positive".to_owned(),
            ));
        }
        Ok(Self { max_chars })
    }
}

impl QuestionFilter for MaxLengthFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::MaxTextLength(self.max_chars))
    }

    fn filter_type(&self) -> &'static str {
        "max_length"
    }

    fn description(&self) -> String {
        format!("Question length: at most {} characters", self.max_chars)
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Difficulty
    }
}
