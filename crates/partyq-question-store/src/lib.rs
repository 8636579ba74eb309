//! SQLite-backed question store for the partyq question engine.
//!
//! [`SqliteQuestionStore`] implements the core
//! [`QuestionStore`](partyq_core::store::QuestionStore) port. Structured
//! queries are rendered to `?`-placeholder SQL by [`sql`]; values are always
//! bound, never interpolated.

pub mod config;
pub mod schema;
pub mod sql;
pub mod sqlite_question_store;

pub use config::StoreConfig;
pub use sqlite_question_store::SqliteQuestionStore;
