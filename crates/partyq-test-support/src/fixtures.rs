//! Question row fixtures.

use partyq_core::store::QuestionRow;

/// A single-language row with generated text, category `party`.
#[must_use]
pub fn question_row(id: i64, question_type: &str, spice: &str, language: &str) -> QuestionRow {
    let text = format!("{question_type} #{id}");
    let (text_en, text_se) = match language {
        "se" => (None, Some(text)),
        _ => (Some(text), None),
    };
    QuestionRow {
        id,
        text_en,
        text_se,
        category: Some("party".to_owned()),
        question_type: Some(question_type.to_owned()),
        spice_level: Some(spice.to_owned()),
        language: Some(language.to_owned()),
    }
}

/// A row carrying both translations, tagged `both`.
#[must_use]
pub fn bilingual_row(id: i64, question_type: &str, spice: &str) -> QuestionRow {
    QuestionRow {
        text_en: Some(format!("{question_type} #{id}")),
        text_se: Some(format!("{question_type} nr {id}")),
        language: Some("both".to_owned()),
        ..question_row(id, question_type, spice, "en")
    }
}

/// `truths` truth rows followed by `dares` dare rows, ids from 1, all
/// English and of the given spice.
#[must_use]
pub fn corpus(truths: usize, dares: usize, spice: &str) -> Vec<QuestionRow> {
    let truth_rows = (0..truths).map(|_| "truth");
    let dare_rows = (0..dares).map(|_| "dare");
    truth_rows
        .chain(dare_rows)
        .zip(1_i64..)
        .map(|(question_type, id)| question_row(id, question_type, spice, "en"))
        .collect()
}
