//! Commands accepted by the session engine.

use std::collections::HashMap;
use std::sync::Arc;

use partyq_filters::QuestionFilter;

/// Request to register a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    /// Game type key, e.g. `truth_or_dare`.
    pub game_type: String,
    /// Player display names, in turn order.
    pub players: Vec<String>,
    /// Number of questions; `None` uses the mode or engine default.
    pub question_count: Option<u32>,
    /// Raw settings map (`truth_ratio`, `spice_level`, `language`, `strict`).
    pub settings: HashMap<String, String>,
    /// Caller-selected filters, checked against the mode's selectable set.
    pub extra_filters: Vec<Arc<dyn QuestionFilter>>,
}

impl CreateSession {
    /// A request with default count, settings and no extra filters.
    #[must_use]
    pub fn new<I, S>(game_type: impl Into<String>, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            game_type: game_type.into(),
            players: players.into_iter().map(Into::into).collect(),
            question_count: None,
            settings: HashMap::new(),
            extra_filters: Vec::new(),
        }
    }

    /// Sets the question count.
    #[must_use]
    pub fn with_question_count(mut self, count: u32) -> Self {
        self.question_count = Some(count);
        self
    }

    /// Adds one settings entry.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Adds a caller-selected filter.
    #[must_use]
    pub fn with_filter<F: QuestionFilter + 'static>(mut self, filter: F) -> Self {
        self.extra_filters.push(Arc::new(filter));
        self
    }
}
