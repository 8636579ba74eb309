//! Engine-wide defaults.

use partyq_core::error::GameError;

use crate::domain::settings::{SessionSettings, parse_truth_ratio};

/// Limits and defaults applied to every session the engine creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Question count when neither the caller nor the game mode gives one.
    pub default_question_count: u32,
    /// Largest question count a caller may request.
    pub max_question_count: u32,
    /// Settings that a session's settings map overrides.
    pub default_settings: SessionSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_question_count: 15,
            max_question_count: 100,
            default_settings: SessionSettings::default(),
        }
    }
}

fn parse_count(key: &str, raw: &str) -> Result<u32, GameError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| {
            GameError::Configuration(format!("{key} must be a positive integer, got '{raw}'"))
        })
}

impl EngineConfig {
    /// Reads `PARTYQ_DEFAULT_QUESTION_COUNT`, `PARTYQ_MAX_QUESTION_COUNT`,
    /// `PARTYQ_DEFAULT_SPICE`, `PARTYQ_DEFAULT_LANGUAGE` and
    /// `PARTYQ_DEFAULT_TRUTH_RATIO`, falling back to [`Default`] for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if a variable holds an invalid
    /// value or the default count exceeds the maximum.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("PARTYQ_DEFAULT_QUESTION_COUNT") {
            config.default_question_count = parse_count("PARTYQ_DEFAULT_QUESTION_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("PARTYQ_MAX_QUESTION_COUNT") {
            config.max_question_count = parse_count("PARTYQ_MAX_QUESTION_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("PARTYQ_DEFAULT_SPICE") {
            config.default_settings.spice_level = raw.parse()?;
        }
        if let Some(raw) = lookup("PARTYQ_DEFAULT_LANGUAGE") {
            config.default_settings.language = raw.parse()?;
        }
        if let Some(raw) = lookup("PARTYQ_DEFAULT_TRUTH_RATIO") {
            config.default_settings.truth_ratio = parse_truth_ratio(&raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks that the default count fits under the maximum.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` otherwise.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.default_question_count == 0 || self.max_question_count == 0 {
            return Err(GameError::Configuration(
                "question counts must be positive".to_owned(),
            ));
        }
        if self.default_question_count > self.max_question_count {
            return Err(GameError::Configuration(format!(
                "default question count {} exceeds maximum {}",
                self.default_question_count, self.max_question_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use partyq_core::question::{Language, SpiceLevel};

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_question_count, 15);
        assert_eq!(config.max_question_count, 100);
    }

    #[test]
    fn test_reads_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("PARTYQ_DEFAULT_QUESTION_COUNT", "8"),
            ("PARTYQ_MAX_QUESTION_COUNT", "40"),
            ("PARTYQ_DEFAULT_SPICE", "medium"),
            ("PARTYQ_DEFAULT_LANGUAGE", "se"),
            ("PARTYQ_DEFAULT_TRUTH_RATIO", "0.5"),
        ]))
        .unwrap();

        assert_eq!(config.default_question_count, 8);
        assert_eq!(config.max_question_count, 40);
        assert_eq!(config.default_settings.spice_level, SpiceLevel::Medium);
        assert_eq!(config.default_settings.language, Language::Se);
        assert!((config.default_settings.truth_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_default_above_maximum() {
        let result = EngineConfig::from_lookup(lookup(&[
            ("PARTYQ_DEFAULT_QUESTION_COUNT", "50"),
            ("PARTYQ_MAX_QUESTION_COUNT", "20"),
        ]));

        assert!(matches!(result, Err(GameError::Configuration(_))));
    }

    #[test]
    fn test_rejects_invalid_values() {
        for (key, value) in [
            ("PARTYQ_DEFAULT_QUESTION_COUNT", "0"),
            ("PARTYQ_MAX_QUESTION_COUNT", "many"),
            ("PARTYQ_DEFAULT_SPICE", "extreme"),
            ("PARTYQ_DEFAULT_TRUTH_RATIO", "2"),
        ] {
            let result = EngineConfig::from_lookup(lookup(&[(key, value)]));

            assert!(
                matches!(result, Err(GameError::Configuration(_))),
                "{key}={value} should be rejected"
            );
        }
    }
}
