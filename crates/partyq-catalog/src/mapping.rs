//! Row validation and mapping into `Question`.

use partyq_core::question::Question;
use partyq_core::store::QuestionRow;

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// Neither translation has any text.
    MissingText,
    /// The type column is empty or not `truth`/`dare`.
    InvalidType(Option<String>),
    /// The spice column is empty or not a known level.
    InvalidSpice(Option<String>),
    /// The language column holds an unknown tag.
    InvalidLanguage(String),
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Validates a raw row and builds a `Question` from it.
///
/// A missing language tag is inferred from which translations are present.
/// Blank categories become `None`.
///
/// # Errors
///
/// Returns the first [`RowRejection`] that applies.
pub fn to_question(row: &QuestionRow) -> Result<Question, RowRejection> {
    let text_en = non_blank(row.text_en.as_ref());
    let text_se = non_blank(row.text_se.as_ref());
    if text_en.is_none() && text_se.is_none() {
        return Err(RowRejection::MissingText);
    }

    let question_type = row
        .parsed_type()
        .ok_or_else(|| RowRejection::InvalidType(row.question_type.clone()))?;
    let spice = row
        .parsed_spice()
        .ok_or_else(|| RowRejection::InvalidSpice(row.spice_level.clone()))?;
    let language = row.effective_language().ok_or_else(|| {
        RowRejection::InvalidLanguage(row.language.clone().unwrap_or_default())
    })?;

    Ok(Question {
        id: row.id,
        text_en,
        text_se,
        category: non_blank(row.category.as_ref()),
        question_type,
        spice,
        language,
    })
}

#[cfg(test)]
mod tests {
    use partyq_core::question::{Language, QuestionType, SpiceLevel};
    use partyq_test_support::{bilingual_row, question_row};

    use super::*;

    #[test]
    fn test_maps_valid_row() {
        // Arrange
        let row = question_row(7, "Dare", "Spicy", "en");

        // Act
        let question = to_question(&row).unwrap();

        // Assert
        assert_eq!(question.id, 7);
        assert_eq!(question.question_type, QuestionType::Dare);
        assert_eq!(question.spice, SpiceLevel::Spicy);
        assert_eq!(question.language, Language::En);
        assert_eq!(question.category.as_deref(), Some("party"));
    }

    #[test]
    fn test_rejects_row_without_text() {
        // Arrange
        let mut row = question_row(1, "truth", "mild", "en");
        row.text_en = Some("   ".into());

        // Act
        let result = to_question(&row);

        // Assert
        assert_eq!(result, Err(RowRejection::MissingText));
    }

    #[test]
    fn test_rejects_unknown_type_and_spice() {
        // Arrange
        let bad_type = question_row(1, "trivia", "mild", "en");
        let bad_spice = question_row(2, "truth", "nuclear", "en");

        // Act
        let type_result = to_question(&bad_type);
        let spice_result = to_question(&bad_spice);

        // Assert
        assert_eq!(
            type_result,
            Err(RowRejection::InvalidType(Some("trivia".into())))
        );
        assert_eq!(
            spice_result,
            Err(RowRejection::InvalidSpice(Some("nuclear".into())))
        );
    }

    #[test]
    fn test_rejects_unknown_language_tag() {
        // Arrange
        let row = question_row(5, "truth", "mild", "fr");

        // Act
        let result = to_question(&row);

        // Assert
        assert_eq!(result, Err(RowRejection::InvalidLanguage("fr".into())));
    }

    #[test]
    fn test_maps_legacy_tags_and_synonyms() {
        // Arrange
        let mut row = question_row(6, "Sanning", "mild", "en");
        row.language = Some("SE_Only".into());
        row.text_se = Some("Vad drömde du i natt?".into());

        // Act
        let question = to_question(&row).unwrap();

        // Assert
        assert_eq!(question.question_type, QuestionType::Truth);
        assert_eq!(question.language, Language::Se);
    }

    #[test]
    fn test_infers_language_when_tag_missing() {
        // Arrange
        let mut row = bilingual_row(3, "truth", "medium");
        row.language = None;

        // Act
        let question = to_question(&row).unwrap();

        // Assert
        assert_eq!(question.language, Language::Both);
    }

    #[test]
    fn test_blank_category_becomes_none() {
        // Arrange
        let mut row = question_row(4, "truth", "mild", "se");
        row.category = Some(String::new());

        // Act
        let question = to_question(&row).unwrap();

        // Assert
        assert_eq!(question.category, None);
        assert_eq!(question.language, Language::Se);
    }
}
