//! Content filters: category, question type, language and keywords.

use partyq_core::error::GameError;
use partyq_core::query::{Predicate, QuestionQuery, SortKey};
use partyq_core::question::{Language, QuestionType};

use crate::filter::{FilterCategory, QuestionFilter};

fn normalize_labels<I, S>(labels: I, what: &str) -> Result<Vec<String>, GameError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim().to_lowercase();
        if label.is_empty() {
            return Err(GameError::Configuration(format!("{what} must not be blank")));
        }
        if !out.contains(&label) {
            out.push(label);
        }
    }
    if out.is_empty() {
        return Err(GameError::Configuration(format!(
            "{what} filter needs at least one value"
        )));
    }
    Ok(out)
}

/// Keeps questions whose category is one of the given labels.
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    categories: Vec<String>,
}

impl CategoryFilter {
    /// Builds the filter. Labels are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if no labels are given or one is blank.
    pub fn new<I, S>(categories: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            categories: normalize_labels(categories, "category")?,
        })
    }
}

impl QuestionFilter for CategoryFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::CategoryIn(self.categories.clone()))
    }

    fn filter_type(&self) -> &'static str {
        "category"
    }

    fn description(&self) -> String {
        format!("Category filter: {}", self.categories.join(", "))
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Content
    }
}

/// Drops questions whose category is one of the given labels.
#[derive(Debug, Clone)]
pub struct ExcludeCategoryFilter {
    categories: Vec<String>,
}

impl ExcludeCategoryFilter {
    /// Builds the filter. Uncategorized questions always pass.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if no labels are given or one is blank.
    pub fn new<I, S>(categories: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            categories: normalize_labels(categories, "excluded category")?,
        })
    }
}

impl QuestionFilter for ExcludeCategoryFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::CategoryNotIn(self.categories.clone()))
    }

    fn filter_type(&self) -> &'static str {
        "exclude_category"
    }

    fn description(&self) -> String {
        format!("Exclude categories: {}", self.categories.join(", "))
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Content
    }
}

/// Keeps only truths or only dares.
#[derive(Debug, Clone, Copy)]
pub struct QuestionTypeFilter {
    question_type: QuestionType,
}

impl QuestionTypeFilter {
    /// Builds the filter for a known type.
    #[must_use]
    pub fn new(question_type: QuestionType) -> Self {
        Self { question_type }
    }

    /// Parses `truth` or `dare`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for any other value.
    pub fn parse(value: &str) -> Result<Self, GameError> {
        Ok(Self::new(value.parse()?))
    }
}

impl QuestionFilter for QuestionTypeFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::TypeIn(vec![self.question_type]))
    }

    fn filter_type(&self) -> &'static str {
        "question_type"
    }

    fn description(&self) -> String {
        format!("{} questions only", self.question_type)
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Content
    }
}

/// Restricts questions to those playable in a language.
///
/// `en` and `se` keep single-language rows of that language plus bilingual
/// rows. `both` keeps everything but orders bilingual rows first, so a
/// later limit only falls back to single-language rows when bilingual ones
/// run out.
#[derive(Debug, Clone, Copy)]
pub struct LanguageFilter {
    language: Language,
}

impl LanguageFilter {
    /// Parses `en`, `se` or `both`, plus the legacy stored tags such as
    /// `EN_Only` or `bilingual`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for any other value.
    pub fn new(language: &str) -> Result<Self, GameError> {
        Ok(Self::for_language(language.parse()?))
    }

    /// Builds the filter for a known language.
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }
}

impl QuestionFilter for LanguageFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        match self.language {
            Language::En => {
                query.with_predicate(Predicate::LanguageIn(vec![Language::En, Language::Both]))
            }
            Language::Se => {
                query.with_predicate(Predicate::LanguageIn(vec![Language::Se, Language::Both]))
            }
            Language::Both => query.with_leading_sort(SortKey::BilingualFirst),
        }
    }

    fn filter_type(&self) -> &'static str {
        "language"
    }

    fn description(&self) -> String {
        match self.language {
            Language::Both => "Language: prefer bilingual".to_owned(),
            other => format!("Language: {other}"),
        }
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Content
    }
}

/// Keeps questions whose text mentions any (or all) of the keywords.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    match_all: bool,
}

impl KeywordFilter {
    /// Builds the filter. `match_all` requires every keyword to appear.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if no keywords are given or one is blank.
    pub fn new<I, S>(keywords: I, match_all: bool) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            keywords: normalize_labels(keywords, "keyword")?,
            match_all,
        })
    }
}

impl QuestionFilter for KeywordFilter {
    fn apply(&self, query: &QuestionQuery) -> QuestionQuery {
        query.with_predicate(Predicate::TextContains {
            keywords: self.keywords.clone(),
            match_all: self.match_all,
        })
    }

    fn filter_type(&self) -> &'static str {
        "keyword"
    }

    fn description(&self) -> String {
        let mode = if self.match_all { "all" } else { "any" };
        format!("Keyword filter ({mode}): {}", self.keywords.join(", "))
    }

    fn category(&self) -> FilterCategory {
        FilterCategory::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter_lowercases_and_dedupes() {
        let filter = CategoryFilter::new(["Party", "party", "Romance"]).unwrap();

        let query = filter.apply(&QuestionQuery::new());

        assert_eq!(
            query.predicates(),
            &[Predicate::CategoryIn(vec!["party".into(), "romance".into()])]
        );
    }

    #[test]
    fn test_category_filter_rejects_empty_input() {
        let empty: [&str; 0] = [];

        assert!(matches!(
            CategoryFilter::new(empty),
            Err(GameError::Configuration(_))
        ));
        assert!(matches!(
            CategoryFilter::new(["  "]),
            Err(GameError::Configuration(_))
        ));
    }

    #[test]
    fn test_language_en_includes_bilingual_rows() {
        let query = LanguageFilter::new("en").unwrap().apply(&QuestionQuery::new());

        assert_eq!(
            query.predicates(),
            &[Predicate::LanguageIn(vec![Language::En, Language::Both])]
        );
        assert!(query.sort().is_empty());
    }

    #[test]
    fn test_language_both_prefers_bilingual_without_excluding() {
        let query = LanguageFilter::new("both")
            .unwrap()
            .apply(&QuestionQuery::new().with_sort(SortKey::Random));

        assert!(query.predicates().is_empty());
        assert_eq!(query.sort(), &[SortKey::BilingualFirst, SortKey::Random]);
    }

    #[test]
    fn test_language_filter_rejects_unknown_language() {
        assert!(matches!(
            LanguageFilter::new("fr"),
            Err(GameError::Configuration(_))
        ));
    }

    #[test]
    fn test_question_type_filter_parse() {
        let filter = QuestionTypeFilter::parse("dare").unwrap();

        assert_eq!(filter.filter_type(), "question_type");
        assert_eq!(filter.description(), "dare questions only");
        assert!(QuestionTypeFilter::parse("trivia").is_err());
    }

    #[test]
    fn test_keyword_filter_description() {
        let filter = KeywordFilter::new(["Song", "dance"], true).unwrap();

        assert_eq!(filter.description(), "Keyword filter (all): song, dance");
    }

    #[test]
    fn test_exclude_category_filter_type() {
        let filter = ExcludeCategoryFilter::new(["drinking"]).unwrap();

        assert_eq!(filter.filter_type(), "exclude_category");
        assert_eq!(filter.category(), FilterCategory::Content);
    }
}
