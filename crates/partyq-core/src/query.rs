//! Structured question query.
//!
//! Filters never build SQL text. They add typed predicates, sort keys and
//! paging to a [`QuestionQuery`], and each store driver renders that into
//! its own parameterized form. Every builder method returns a new query and
//! leaves the receiver untouched.

use serde::Serialize;

use crate::question::{Language, QuestionType, SpiceLevel};
use crate::store::QuestionRow;

/// A single row-selection constraint. Bound values travel inside the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Predicate {
    /// Category equals one of the (lowercase) labels.
    CategoryIn(Vec<String>),
    /// Category is missing or equals none of the (lowercase) labels.
    CategoryNotIn(Vec<String>),
    /// Question type is one of the listed types, under any stored synonym.
    TypeIn(Vec<QuestionType>),
    /// Spice level is one of the listed levels.
    SpiceIn(Vec<SpiceLevel>),
    /// The row's effective language is one of the listed tags: the stored
    /// tag under any synonym, or the language inferred for an untagged row.
    LanguageIn(Vec<Language>),
    /// Either translation contains the (lowercase) keywords.
    TextContains {
        /// Keywords to look for.
        keywords: Vec<String>,
        /// `true` requires every keyword, `false` any of them.
        match_all: bool,
    },
    /// Identifier is not in the list.
    IdNotIn(Vec<i64>),
    /// Primary text is at most this many characters.
    MaxTextLength(u32),
}

impl Predicate {
    /// Evaluates the predicate against a raw row, with the same semantics
    /// the SQL drivers render.
    #[must_use]
    pub fn matches(&self, row: &QuestionRow) -> bool {
        let lower = |v: &Option<String>| v.as_deref().map(str::to_lowercase);
        match self {
            Self::CategoryIn(labels) => {
                lower(&row.category).is_some_and(|c| labels.iter().any(|l| *l == c))
            }
            Self::CategoryNotIn(labels) => {
                lower(&row.category).is_none_or(|c| labels.iter().all(|l| *l != c))
            }
            Self::TypeIn(types) => row.parsed_type().is_some_and(|t| types.contains(&t)),
            Self::SpiceIn(levels) => row.parsed_spice().is_some_and(|s| levels.contains(&s)),
            Self::LanguageIn(tags) => row
                .effective_language()
                .is_some_and(|l| tags.contains(&l)),
            Self::TextContains {
                keywords,
                match_all,
            } => {
                let en = lower(&row.text_en).unwrap_or_default();
                let se = lower(&row.text_se).unwrap_or_default();
                let hit = |k: &String| en.contains(k.as_str()) || se.contains(k.as_str());
                if *match_all {
                    keywords.iter().all(hit)
                } else {
                    keywords.iter().any(hit)
                }
            }
            Self::IdNotIn(ids) => !ids.contains(&row.id),
            Self::MaxTextLength(max) => {
                let text = row
                    .text_en
                    .as_deref()
                    .or(row.text_se.as_deref())
                    .unwrap_or_default();
                text.chars().count() <= *max as usize
            }
        }
    }
}

/// Result ordering keys, applied in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Bilingual rows before single-language rows.
    BilingualFirst,
    /// Random order.
    Random,
    /// Ascending identifier.
    Id,
}

/// The query a filter pipeline builds up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionQuery {
    predicates: Vec<Predicate>,
    sort: Vec<SortKey>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl QuestionQuery {
    /// A query matching every row, in store order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate. Adding one that is already present is a no-op.
    #[must_use]
    pub fn with_predicate(&self, predicate: Predicate) -> Self {
        let mut next = self.clone();
        if !next.predicates.contains(&predicate) {
            next.predicates.push(predicate);
        }
        next
    }

    /// Appends a sort key unless it is already present.
    #[must_use]
    pub fn with_sort(&self, key: SortKey) -> Self {
        let mut next = self.clone();
        if !next.sort.contains(&key) {
            next.sort.push(key);
        }
        next
    }

    /// Makes `key` the highest-priority sort key.
    #[must_use]
    pub fn with_leading_sort(&self, key: SortKey) -> Self {
        let mut next = self.clone();
        next.sort.retain(|k| *k != key);
        next.sort.insert(0, key);
        next
    }

    /// Caps the result count. Repeated caps keep the smallest.
    #[must_use]
    pub fn with_limit(&self, limit: u32) -> Self {
        let mut next = self.clone();
        next.limit = Some(next.limit.map_or(limit, |l| l.min(limit)));
        next
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub fn with_offset(&self, offset: u32) -> Self {
        let mut next = self.clone();
        next.offset = (offset > 0).then_some(offset);
        next
    }

    /// Same predicates, without ordering or paging. Used for counting.
    #[must_use]
    pub fn selection_only(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            ..Self::default()
        }
    }

    /// Row-selection predicates, in the order they were added.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Sort keys, highest priority first.
    #[must_use]
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    /// Row cap, if any.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Rows to skip, if any.
    #[must_use]
    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    /// Whether `row` passes every predicate.
    #[must_use]
    pub fn matches(&self, row: &QuestionRow) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}
