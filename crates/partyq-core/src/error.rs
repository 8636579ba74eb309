//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level error type for filters, the question repository and sessions.
#[derive(Debug, Error)]
pub enum GameError {
    /// A filter, setting or game mode was built with an invalid parameter.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The question store could not be reached or the query failed.
    #[error("question store unavailable: {0}")]
    StoreUnavailable(String),

    /// The composed filters matched fewer questions than the caller accepts.
    #[error("no matching questions: requested {requested}, found {available}")]
    NoMatchingQuestions {
        /// How many questions the caller asked for.
        requested: usize,
        /// How many valid questions the store returned.
        available: usize,
    },

    /// No session is registered under the identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// The session has already walked through all of its questions.
    #[error("session finished: {0}")]
    SessionFinished(Uuid),

    /// Fewer than two distinct, non-empty player names.
    #[error("insufficient players: need at least 2 distinct names, found {found}")]
    InsufficientPlayers {
        /// Number of distinct, non-empty names supplied.
        found: usize,
    },

    /// The operation is not valid in the session's current state.
    #[error("invalid transition on session {session_id}: cannot {operation} while {state}")]
    InvalidTransition {
        /// The session the operation targeted.
        session_id: Uuid,
        /// The state name the session was in.
        state: &'static str,
        /// The attempted operation.
        operation: &'static str,
    },
}

impl GameError {
    /// Machine-readable error code, stable across releases.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::NoMatchingQuestions { .. } => "no_matching_questions",
            Self::SessionNotFound(_) => "session_not_found",
            Self::SessionFinished(_) => "session_finished",
            Self::InsufficientPlayers { .. } => "insufficient_players",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }
}
