//! Read-only views returned by the session engine.

use chrono::{DateTime, Utc};
use partyq_core::question::{Question, QuestionType, SpiceLevel};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::session::{GameSession, SessionState};

/// The question to play now and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentQuestionView {
    /// The session.
    pub session_id: Uuid,
    /// Store identifier of the question.
    pub question_id: i64,
    /// Text in the session's language, falling back to the other one.
    pub text: String,
    /// Truth or dare.
    pub question_type: QuestionType,
    /// Spice level.
    pub spice: SpiceLevel,
    /// Category label, if any.
    pub category: Option<String>,
    /// Player whose turn it is.
    pub player: String,
    /// 1-based position of this question.
    pub question_number: usize,
    /// Number of questions in the session.
    pub total_questions: usize,
    /// `question_number / total_questions`, as a rounded percentage.
    pub progress_percent: u8,
    /// Whether the session has finished.
    pub finished: bool,
}

impl CurrentQuestionView {
    pub(crate) fn new(session: &GameSession, question: &Question) -> Self {
        Self {
            session_id: session.id(),
            question_id: question.id,
            text: question.text_for(session.settings().language).to_owned(),
            question_type: question.question_type,
            spice: question.spice,
            category: question.category.clone(),
            player: session.current_player().unwrap_or_default().to_owned(),
            question_number: session.current_index() + 1,
            total_questions: session.total_questions(),
            progress_percent: session.question_progress(),
            finished: session.state() == SessionState::Finished,
        }
    }
}

/// What a `submit` call did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// The session.
    pub session_id: Uuid,
    /// Whether the question was marked completed rather than skipped.
    pub completed: bool,
    /// Questions completed or skipped so far.
    pub answered: usize,
    /// Number of questions in the session.
    pub total_questions: usize,
    /// Share answered; 100 only once finished.
    pub progress_percent: u8,
    /// Whether that was the last question.
    pub finished: bool,
    /// Whose turn it is next, unless finished.
    pub next_player: Option<String>,
}

impl SubmitOutcome {
    pub(crate) fn new(session: &GameSession, completed: bool) -> Self {
        Self {
            session_id: session.id(),
            completed,
            answered: session.answered(),
            total_questions: session.total_questions(),
            progress_percent: session.completion_progress(),
            finished: session.state() == SessionState::Finished,
            next_player: session.current_player().map(str::to_owned),
        }
    }
}

/// Where a session stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatusView {
    /// The session.
    pub session_id: Uuid,
    /// Game type key.
    pub game_type: String,
    /// Lifecycle state.
    pub state: SessionState,
    /// 1-based number of the question in play, capped at the total.
    pub question_number: usize,
    /// Number of selected questions; zero before start.
    pub total_questions: usize,
    /// Roster in turn order.
    pub players: Vec<String>,
    /// Whose turn it is, while playing.
    pub current_player: Option<String>,
    /// Whether questions have been selected.
    pub started: bool,
    /// Whether every question has been played.
    pub finished: bool,
    /// Share answered; 100 only once finished.
    pub progress_percent: u8,
}

impl SessionStatusView {
    pub(crate) fn new(session: &GameSession) -> Self {
        let state = session.state();
        let total = session.total_questions();
        Self {
            session_id: session.id(),
            game_type: session.game_type().to_owned(),
            state,
            question_number: (session.current_index() + 1).min(total),
            total_questions: total,
            players: session.players().to_vec(),
            current_player: session.current_player().map(str::to_owned),
            started: session.started_at().is_some(),
            finished: state == SessionState::Finished,
            progress_percent: session.completion_progress(),
        }
    }
}

/// A session's bookkeeping, returned by `end` and `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// The session.
    pub session_id: Uuid,
    /// Game type key.
    pub game_type: String,
    /// Lifecycle state.
    pub state: SessionState,
    /// Roster in turn order.
    pub players: Vec<String>,
    /// Number of selected questions.
    pub total_questions: usize,
    /// Questions marked completed.
    pub completed: u32,
    /// Questions skipped.
    pub skipped: u32,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the last question was played.
    pub finished_at: Option<DateTime<Utc>>,
    /// When the session was ended.
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    pub(crate) fn new(session: &GameSession) -> Self {
        Self {
            session_id: session.id(),
            game_type: session.game_type().to_owned(),
            state: session.state(),
            players: session.players().to_vec(),
            total_questions: session.total_questions(),
            completed: session.completed(),
            skipped: session.skipped(),
            created_at: session.created_at(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
            ended_at: session.ended_at(),
        }
    }
}
