//! Corpus statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use partyq_core::store::QuestionRow;

const UNKNOWN: &str = "unknown";

/// Row counts broken down by type, spice level, language and category.
///
/// Labels are lowercased; rows with an empty column count under `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionStats {
    /// All rows considered.
    pub total: u64,
    /// Counts per question type.
    pub by_type: BTreeMap<String, u64>,
    /// Counts per spice level.
    pub by_spice: BTreeMap<String, u64>,
    /// Counts per language tag.
    pub by_language: BTreeMap<String, u64>,
    /// Counts per category.
    pub by_category: BTreeMap<String, u64>,
}

fn bucket(value: Option<&String>) -> String {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

impl QuestionStats {
    /// Tallies `rows`.
    #[must_use]
    pub fn from_rows(rows: &[QuestionRow]) -> Self {
        let mut stats = Self::default();
        for row in rows {
            stats.total += 1;
            *stats.by_type.entry(bucket(row.question_type.as_ref())).or_default() += 1;
            *stats.by_spice.entry(bucket(row.spice_level.as_ref())).or_default() += 1;
            *stats.by_language.entry(bucket(row.language.as_ref())).or_default() += 1;
            *stats.by_category.entry(bucket(row.category.as_ref())).or_default() += 1;
        }
        stats
    }
}
