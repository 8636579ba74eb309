//! Question data model.
//!
//! Questions are written by the ingestion pipeline and are read-only here.
//! The enumerations double as filter parameters, so parsing them is where
//! out-of-range configuration values are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Whether a question asks for a truthful answer or a dare to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Answer honestly.
    Truth,
    /// Perform a challenge.
    Dare,
}

impl QuestionType {
    /// Both types.
    pub const ALL: [Self; 2] = [Self::Truth, Self::Dare];

    /// Canonical storage value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Truth => "truth",
            Self::Dare => "dare",
        }
    }

    /// Every lowercase stored value that means this type, canonical first.
    /// Parsing, row mapping and store predicates all use this list.
    #[must_use]
    pub fn stored_tags(self) -> &'static [&'static str] {
        match self {
            Self::Truth => &["truth", "sanning"],
            Self::Dare => &["dare", "konsekvens", "consequence"],
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.stored_tags().contains(&tag.as_str()))
            .ok_or_else(|| {
                GameError::Configuration(format!(
                    "unknown question type '{tag}': expected truth or dare"
                ))
            })
    }
}

/// Ordered intensity of a question: `Mild < Medium < Spicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    /// Safe for any group.
    Mild,
    /// Somewhat personal.
    Medium,
    /// Adults only.
    Spicy,
}

impl SpiceLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Mild, Self::Medium, Self::Spicy];

    /// Canonical storage value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Medium => "medium",
            Self::Spicy => "spicy",
        }
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiceLevel {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "medium" => Ok(Self::Medium),
            "spicy" => Ok(Self::Spicy),
            other => Err(GameError::Configuration(format!(
                "unknown spice level '{other}': expected one of mild, medium, spicy"
            ))),
        }
    }
}

/// Language of a stored question, or the language a session is played in.
///
/// As a row tag, `Both` marks a bilingual question. As a session setting,
/// `Both` means "prefer bilingual questions, fall back to either language".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English.
    En,
    /// Swedish.
    Se,
    /// Bilingual.
    Both,
}

impl Language {
    /// Every language tag.
    pub const ALL: [Self; 3] = [Self::En, Self::Se, Self::Both];

    /// Canonical storage value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Se => "se",
            Self::Both => "both",
        }
    }

    /// Every lowercase stored tag that means this language, canonical
    /// first. Parsing, row mapping and store predicates all use this list.
    #[must_use]
    pub fn stored_tags(self) -> &'static [&'static str] {
        match self {
            Self::En => &["en", "en_only", "en only", "english"],
            Self::Se => &["se", "se_only", "se only", "swedish"],
            Self::Both => &["both", "bilingual"],
        }
    }

    /// Language of an untagged row, from which translations have text.
    #[must_use]
    pub fn inferred_from(has_en: bool, has_se: bool) -> Self {
        match (has_en, has_se) {
            (true, true) => Self::Both,
            (false, true) => Self::Se,
            _ => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.stored_tags().contains(&tag.as_str()))
            .ok_or_else(|| {
                GameError::Configuration(format!(
                    "unknown language '{tag}': expected one of en, se, both"
                ))
            })
    }
}

/// A validated question from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Store-assigned identifier.
    pub id: i64,
    /// English text, if any.
    pub text_en: Option<String>,
    /// Swedish text, if any.
    pub text_se: Option<String>,
    /// Free-form category label.
    pub category: Option<String>,
    /// Truth or dare.
    pub question_type: QuestionType,
    /// Intensity.
    pub spice: SpiceLevel,
    /// Language tag.
    pub language: Language,
}

impl Question {
    /// Text to show when playing in `language`, falling back to whichever
    /// translation exists.
    #[must_use]
    pub fn text_for(&self, language: Language) -> &str {
        let (preferred, fallback) = match language {
            Language::Se => (&self.text_se, &self.text_en),
            Language::En | Language::Both => (&self.text_en, &self.text_se),
        };
        preferred
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(fallback.as_deref())
            .unwrap_or_default()
    }
}
