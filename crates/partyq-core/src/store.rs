//! Question store abstraction.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::GameError;
use crate::query::QuestionQuery;
use crate::question::{Language, QuestionType, SpiceLevel};

/// A question row exactly as the store holds it, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// English text.
    pub text_en: Option<String>,
    /// Swedish text.
    pub text_se: Option<String>,
    /// Category label.
    pub category: Option<String>,
    /// Question type as stored (`truth` / `dare`).
    pub question_type: Option<String>,
    /// Spice level as stored.
    pub spice_level: Option<String>,
    /// Language tag as stored (`en` / `se` / `both`).
    pub language: Option<String>,
}

fn has_text(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl QuestionRow {
    /// Stored type, parsed with the same synonyms as row mapping.
    #[must_use]
    pub fn parsed_type(&self) -> Option<QuestionType> {
        self.question_type.as_deref().and_then(|t| t.parse().ok())
    }

    /// Stored spice level, parsed.
    #[must_use]
    pub fn parsed_spice(&self) -> Option<SpiceLevel> {
        self.spice_level.as_deref().and_then(|s| s.parse().ok())
    }

    /// Language the row counts as: the stored tag when present, otherwise
    /// inferred from which translations have text. `None` for an unknown
    /// tag.
    #[must_use]
    pub fn effective_language(&self) -> Option<Language> {
        match self.language.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => tag.parse().ok(),
            _ => Some(Language::inferred_from(
                has_text(self.text_en.as_ref()),
                has_text(self.text_se.as_ref()),
            )),
        }
    }
}

/// Read-only access to the question corpus.
///
/// Implementations execute a structured [`QuestionQuery`] using
/// parameterized statements only, and never retry on failure.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Returns the rows matching `query`, in the order the query defines.
    async fn fetch_rows(&self, query: &QuestionQuery) -> Result<Vec<QuestionRow>, GameError>;

    /// Counts rows matching the predicates of `query`, ignoring ordering
    /// and paging.
    async fn count_rows(&self, query: &QuestionQuery) -> Result<u64, GameError>;
}
