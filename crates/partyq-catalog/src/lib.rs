//! Question repository for the partyq question engine.
//!
//! [`QuestionRepository`] is the only component that talks to a
//! [`QuestionStore`](partyq_core::store::QuestionStore). It runs filter
//! composites against the store and either hands back raw rows or
//! validated [`Question`](partyq_core::question::Question)s.

pub mod mapping;
pub mod repository;
pub mod stats;

pub use repository::{QuestionBatch, QuestionRepository, RetrievalMode};
pub use stats::QuestionStats;
