//! Per-session settings.

use partyq_core::error::GameError;
use partyq_core::question::{Language, SpiceLevel};
use serde::Serialize;
use tracing::warn;

/// Snapshot of the options a session was created with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSettings {
    /// Share of truths in the selected set, in `[0, 1]`.
    pub truth_ratio: f64,
    /// Spice level every selected question must have.
    pub spice_level: SpiceLevel,
    /// Language the session is played in.
    pub language: Language,
    /// Fail `start` instead of playing with fewer questions than requested.
    pub strict: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            truth_ratio: 0.6,
            spice_level: SpiceLevel::Mild,
            language: Language::En,
            strict: false,
        }
    }
}

/// Parses a truth ratio.
///
/// # Errors
///
/// Returns `GameError::Configuration` unless the value is a number in `[0, 1]`.
pub fn parse_truth_ratio(raw: &str) -> Result<f64, GameError> {
    let ratio: f64 = raw.trim().parse().map_err(|_| {
        GameError::Configuration(format!("truth_ratio must be a number, got '{raw}'"))
    })?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(GameError::Configuration(format!(
            "truth_ratio must be between 0 and 1, got {ratio}"
        )));
    }
    Ok(ratio)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, GameError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GameError::Configuration(format!(
            "{key} must be true or false, got '{raw}'"
        ))),
    }
}

impl SessionSettings {
    /// Builds settings from a key/value map, starting from `self`.
    ///
    /// Recognized keys are `truth_ratio`, `spice_level`, `language` and
    /// `strict`. Unknown keys are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if a recognized key holds an
    /// invalid value.
    pub fn overridden_by<I, K, V>(self, entries: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = self;
        for (key, value) in entries {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "truth_ratio" => settings.truth_ratio = parse_truth_ratio(value)?,
                "spice_level" => settings.spice_level = value.parse()?,
                "language" => settings.language = value.parse()?,
                "strict" => settings.strict = parse_flag(key, value)?,
                other => warn!(key = other, "ignoring unknown session setting"),
            }
        }
        Ok(settings)
    }

    /// Same as [`overridden_by`](Self::overridden_by) starting from the
    /// defaults.
    ///
    /// # Errors
    ///
    /// See [`overridden_by`](Self::overridden_by).
    pub fn from_map<I, K, V>(entries: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::default().overridden_by(entries)
    }
}
