//! Game-mode configuration and the registry of known modes.

use std::collections::HashMap;
use std::sync::Arc;

use partyq_core::error::GameError;
use partyq_filters::{GameModeFilter, QuestionFilter};
use serde::Serialize;

/// Filter keys callers may add on top of a mode's own filters.
pub const STANDARD_SELECTABLE_FILTERS: [&str; 5] =
    ["category", "exclude_category", "keyword", "max_length", "no_repeat"];

/// Display metadata for front ends. Not used by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationHints {
    /// Title shown to players.
    pub display_name: String,
    /// One-line explanation of the mode.
    pub description: String,
    /// Label for the "done" action.
    pub complete_label: String,
    /// Label for the "skip" action.
    pub skip_label: String,
}

/// How one game type selects and plays its questions. Immutable once
/// registered.
#[derive(Debug, Clone)]
pub struct GameModeConfig {
    /// Registry key, e.g. `truth_or_dare`.
    pub key: String,
    /// Always applied first.
    pub mandatory_filter: Arc<dyn QuestionFilter>,
    /// Applied after the mandatory filter, before caller filters.
    pub default_filters: Vec<Arc<dyn QuestionFilter>>,
    /// `filter_type` keys callers may add.
    pub selectable_filters: Vec<&'static str>,
    /// Question count used when the caller gives none. `None` defers to the
    /// engine default.
    pub default_question_count: Option<u32>,
    /// Whether players may skip a question.
    pub supports_skip: bool,
    /// Display metadata.
    pub hints: PresentationHints,
}

impl GameModeConfig {
    /// A mode with no default filters, the standard selectable filters and
    /// skipping allowed.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        mandatory_filter: Arc<dyn QuestionFilter>,
        hints: PresentationHints,
    ) -> Self {
        Self {
            key: key.into(),
            mandatory_filter,
            default_filters: Vec::new(),
            selectable_filters: STANDARD_SELECTABLE_FILTERS.to_vec(),
            default_question_count: None,
            supports_skip: true,
            hints,
        }
    }

    /// Adds a default filter.
    #[must_use]
    pub fn with_default_filter(mut self, filter: Arc<dyn QuestionFilter>) -> Self {
        self.default_filters.push(filter);
        self
    }

    /// Sets the mode's own default question count.
    #[must_use]
    pub fn with_default_question_count(mut self, count: u32) -> Self {
        self.default_question_count = Some(count);
        self
    }

    /// Disallows skipping.
    #[must_use]
    pub fn without_skip(mut self) -> Self {
        self.supports_skip = false;
        self
    }

    /// Whether callers may add a filter of this kind.
    #[must_use]
    pub fn allows_filter(&self, filter_type: &str) -> bool {
        self.selectable_filters.contains(&filter_type)
    }
}

fn hints(display_name: &str, description: &str) -> PresentationHints {
    PresentationHints {
        display_name: display_name.to_owned(),
        description: description.to_owned(),
        complete_label: "Done".to_owned(),
        skip_label: "Skip".to_owned(),
    }
}

/// Game type key to configuration. Built once at startup and handed to the
/// engine.
#[derive(Debug, Clone)]
pub struct GameModeRegistry {
    modes: HashMap<String, GameModeConfig>,
}

impl Default for GameModeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GameModeRegistry {
    /// The default game type.
    pub const DEFAULT_MODE: &'static str = "truth_or_dare";

    /// A registry with no modes.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            modes: HashMap::new(),
        }
    }

    /// `truth_or_dare`, `truth_only` and `dare_only`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(GameModeConfig::new(
            "truth_or_dare",
            Arc::new(GameModeFilter::truth_or_dare()),
            hints(
                "Truth or Dare",
                "Party game with truth questions and dare challenges",
            ),
        ));
        registry.register(GameModeConfig::new(
            "truth_only",
            Arc::new(GameModeFilter::truth_only()),
            hints("Truth", "Only truth questions, no dares"),
        ));
        registry.register(GameModeConfig::new(
            "dare_only",
            Arc::new(GameModeFilter::dare_only()),
            hints("Dare", "Only dare challenges, no truths"),
        ));
        registry
    }

    /// Adds or replaces a mode.
    pub fn register(&mut self, config: GameModeConfig) {
        self.modes.insert(config.key.clone(), config);
    }

    /// Looks up a mode by key.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for an unknown key.
    pub fn get(&self, key: &str) -> Result<&GameModeConfig, GameError> {
        self.modes.get(key).ok_or_else(|| {
            GameError::Configuration(format!(
                "unknown game type '{key}': expected one of {}",
                self.keys().join(", ")
            ))
        })
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
