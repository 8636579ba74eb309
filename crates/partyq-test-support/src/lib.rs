//! Shared test doubles and fixtures for the partyq question engine.

mod clock;
mod fixtures;
mod logging;
mod rng;
mod store;

pub use clock::FixedClock;
pub use fixtures::{bilingual_row, corpus, question_row};
pub use logging::init_test_tracing;
pub use rng::{MockRng, SequenceRng};
pub use store::{FailingQuestionStore, InMemoryQuestionStore};
