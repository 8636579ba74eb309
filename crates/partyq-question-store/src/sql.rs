//! Renders a [`QuestionQuery`] into parameterized SQLite SQL.

use std::fmt::Write as _;

use partyq_core::query::{Predicate, QuestionQuery, SortKey};
use partyq_core::question::Language;

use crate::schema::QUESTION_COLUMNS;

/// The language a row counts as: its tag when present, otherwise inferred
/// from which translations have text. Matches `QuestionRow::effective_language`.
pub const EFFECTIVE_LANGUAGE: &str = "CASE \
     WHEN TRIM(COALESCE(language, '')) <> '' THEN LOWER(TRIM(language)) \
     WHEN TRIM(COALESCE(text_en, '')) <> '' AND TRIM(COALESCE(text_se, '')) <> '' THEN 'both' \
     WHEN TRIM(COALESCE(text_se, '')) <> '' THEN 'se' \
     ELSE 'en' END";

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// Bound as `TEXT`.
    Text(String),
    /// Bound as `INTEGER`.
    Int(i64),
}

/// SQL text plus its bound values, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSql {
    /// Statement text using `?` placeholders.
    pub sql: String,
    /// Values for the placeholders, left to right.
    pub params: Vec<SqlParam>,
}

/// Renders the full row query: predicates, ordering and paging.
#[must_use]
pub fn render_select(query: &QuestionQuery) -> RenderedSql {
    let mut params = Vec::new();
    let mut sql = format!("SELECT {QUESTION_COLUMNS} FROM questions");
    push_where(&mut sql, &mut params, query.predicates());

    if !query.sort().is_empty() {
        let order: Vec<String> = query
            .sort()
            .iter()
            .map(|key| match key {
                SortKey::BilingualFirst => {
                    let tags: Vec<String> = Language::Both
                        .stored_tags()
                        .iter()
                        .map(|t| format!("'{t}'"))
                        .collect();
                    format!(
                        "CASE WHEN {EFFECTIVE_LANGUAGE} IN ({}) THEN 0 ELSE 1 END",
                        tags.join(", ")
                    )
                }
                SortKey::Random => "RANDOM()".to_owned(),
                SortKey::Id => "id ASC".to_owned(),
            })
            .collect();
        let _ = write!(sql, " ORDER BY {}", order.join(", "));
    }

    match (query.limit(), query.offset()) {
        (Some(limit), offset) => {
            sql.push_str(" LIMIT ?");
            params.push(SqlParam::Int(i64::from(limit)));
            if let Some(offset) = offset {
                sql.push_str(" OFFSET ?");
                params.push(SqlParam::Int(i64::from(offset)));
            }
        }
        (None, Some(offset)) => {
            sql.push_str(" LIMIT -1 OFFSET ?");
            params.push(SqlParam::Int(i64::from(offset)));
        }
        (None, None) => {}
    }

    RenderedSql { sql, params }
}

/// Renders a `COUNT(*)` over the query's predicates only.
#[must_use]
pub fn render_count(query: &QuestionQuery) -> RenderedSql {
    let mut params = Vec::new();
    let mut sql = "SELECT COUNT(*) FROM questions".to_owned();
    push_where(&mut sql, &mut params, query.predicates());
    RenderedSql { sql, params }
}

fn push_where(sql: &mut String, params: &mut Vec<SqlParam>, predicates: &[Predicate]) {
    if predicates.is_empty() {
        return;
    }
    let clauses: Vec<String> = predicates
        .iter()
        .map(|p| render_predicate(p, params))
        .collect();
    let _ = write!(sql, " WHERE {}", clauses.join(" AND "));
}

fn render_predicate(predicate: &Predicate, params: &mut Vec<SqlParam>) -> String {
    match predicate {
        Predicate::CategoryIn(labels) => in_list("LOWER(category)", labels.iter().cloned(), params),
        Predicate::CategoryNotIn(labels) => {
            if labels.is_empty() {
                return "1".to_owned();
            }
            let list = in_list("LOWER(category)", labels.iter().cloned(), params);
            format!("(category IS NULL OR NOT {list})")
        }
        Predicate::TypeIn(types) => in_list(
            "LOWER(TRIM(question_type))",
            types
                .iter()
                .flat_map(|t| t.stored_tags())
                .map(|tag| (*tag).to_owned())
                .collect::<Vec<_>>()
                .into_iter(),
            params,
        ),
        Predicate::SpiceIn(levels) => in_list(
            "LOWER(TRIM(spice_level))",
            levels.iter().map(|l| l.as_str().to_owned()),
            params,
        ),
        Predicate::LanguageIn(languages) => in_list(
            &format!("({EFFECTIVE_LANGUAGE})"),
            languages
                .iter()
                .flat_map(|l| l.stored_tags())
                .map(|tag| (*tag).to_owned())
                .collect::<Vec<_>>()
                .into_iter(),
            params,
        ),
        Predicate::TextContains {
            keywords,
            match_all,
        } => {
            if keywords.is_empty() {
                return if *match_all { "1" } else { "0" }.to_owned();
            }
            let parts: Vec<String> = keywords
                .iter()
                .map(|keyword| {
                    let pattern = format!("%{}%", escape_like(keyword));
                    params.push(SqlParam::Text(pattern.clone()));
                    params.push(SqlParam::Text(pattern));
                    "(LOWER(COALESCE(text_en, '')) LIKE ? ESCAPE '\\' \
                     OR LOWER(COALESCE(text_se, '')) LIKE ? ESCAPE '\\')"
                        .to_owned()
                })
                .collect();
            let joiner = if *match_all { " AND " } else { " OR " };
            format!("({})", parts.join(joiner))
        }
        Predicate::IdNotIn(ids) => {
            if ids.is_empty() {
                return "1".to_owned();
            }
            params.extend(ids.iter().map(|id| SqlParam::Int(*id)));
            format!("id NOT IN ({})", placeholders(ids.len()))
        }
        Predicate::MaxTextLength(max) => {
            params.push(SqlParam::Int(i64::from(*max)));
            "LENGTH(COALESCE(text_en, text_se, '')) <= ?".to_owned()
        }
    }
}

fn in_list(
    column: &str,
    values: impl ExactSizeIterator<Item = String>,
    params: &mut Vec<SqlParam>,
) -> String {
    let len = values.len();
    if len == 0 {
        return "0".to_owned();
    }
    params.extend(values.map(SqlParam::Text));
    format!("{column} IN ({})", placeholders(len))
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use partyq_core::question::{Language, QuestionType, SpiceLevel};

    use super::*;

    #[test]
    fn test_empty_query_selects_everything() {
        let rendered = render_select(&QuestionQuery::new());

        assert_eq!(
            rendered.sql,
            "SELECT id, text_en, text_se, category, question_type, spice_level, language \
             FROM questions"
        );
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn test_predicates_render_placeholders_in_bind_order() {
        // Arrange
        let query = QuestionQuery::new()
            .with_predicate(Predicate::TypeIn(vec![QuestionType::Truth, QuestionType::Dare]))
            .with_predicate(Predicate::SpiceIn(vec![SpiceLevel::Mild]))
            .with_predicate(Predicate::LanguageIn(vec![Language::Se, Language::Both]))
            .with_limit(10);

        // Act
        let rendered = render_select(&query);

        // Assert
        assert!(rendered.sql.ends_with(&format!(
            "WHERE LOWER(TRIM(question_type)) IN (?, ?, ?, ?, ?) \
             AND LOWER(TRIM(spice_level)) IN (?) \
             AND ({EFFECTIVE_LANGUAGE}) IN (?, ?, ?, ?, ?, ?) LIMIT ?"
        )));
        let text = |v: &str| SqlParam::Text(v.into());
        assert_eq!(
            rendered.params,
            vec![
                text("truth"),
                text("sanning"),
                text("dare"),
                text("konsekvens"),
                text("consequence"),
                text("mild"),
                text("se"),
                text("se_only"),
                text("se only"),
                text("swedish"),
                text("both"),
                text("bilingual"),
                SqlParam::Int(10),
            ]
        );
    }

    #[test]
    fn test_sort_keys_render_in_priority_order() {
        // Arrange
        let query = QuestionQuery::new()
            .with_sort(SortKey::Random)
            .with_leading_sort(SortKey::BilingualFirst);

        // Act
        let rendered = render_select(&query);

        // Assert
        assert!(rendered.sql.ends_with(&format!(
            "ORDER BY CASE WHEN {EFFECTIVE_LANGUAGE} IN ('both', 'bilingual') THEN 0 ELSE 1 END, \
             RANDOM()"
        )));
    }

    #[test]
    fn test_offset_without_limit_uses_unbounded_limit() {
        let rendered = render_select(&QuestionQuery::new().with_offset(5));

        assert!(rendered.sql.ends_with("LIMIT -1 OFFSET ?"));
        assert_eq!(rendered.params, vec![SqlParam::Int(5)]);
    }

    #[test]
    fn test_keyword_values_are_bound_and_escaped() {
        let query = QuestionQuery::new().with_predicate(Predicate::TextContains {
            keywords: vec!["100%".into()],
            match_all: false,
        });

        let rendered = render_select(&query);

        assert!(!rendered.sql.contains("100"));
        assert_eq!(rendered.params[0], SqlParam::Text("%100\\%%".into()));
        assert_eq!(rendered.params.len(), 2);
    }

    #[test]
    fn test_count_ignores_sort_and_paging() {
        let query = QuestionQuery::new()
            .with_predicate(Predicate::IdNotIn(vec![3, 4]))
            .with_sort(SortKey::Random)
            .with_limit(2);

        let rendered = render_count(&query);

        assert_eq!(
            rendered.sql,
            "SELECT COUNT(*) FROM questions WHERE id NOT IN (?, ?)"
        );
        assert_eq!(rendered.params, vec![SqlParam::Int(3), SqlParam::Int(4)]);
    }

    #[test]
    fn test_exclusion_keeps_uncategorized_rows() {
        let query =
            QuestionQuery::new().with_predicate(Predicate::CategoryNotIn(vec!["drinking".into()]));

        let rendered = render_count(&query);

        assert!(
            rendered
                .sql
                .ends_with("WHERE (category IS NULL OR NOT LOWER(category) IN (?))")
        );
    }
}
