//! Question store database schema.

/// SQL to create the questions table and its lookup indexes.
pub const CREATE_QUESTIONS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS questions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    text_en       TEXT,
    text_se       TEXT,
    category      TEXT,
    question_type TEXT,
    spice_level   TEXT,
    language      TEXT
);

CREATE INDEX IF NOT EXISTS idx_questions_type_spice
    ON questions (question_type, spice_level);

CREATE INDEX IF NOT EXISTS idx_questions_category
    ON questions (category);
";

/// Columns selected for every question row, in `QuestionRow` field order.
pub const QUESTION_COLUMNS: &str =
    "id, text_en, text_se, category, question_type, spice_level, language";
