//! The game session state machine.
//!
//! ```text
//! Created ──start──▶ Started ──first fetch──▶ InProgress ──last submit──▶ Finished
//!    │                  │                         │
//!    └──────────────────┴────────── end ──────────┴──▶ Ended
//! ```
//!
//! The question list is fixed at `start` and the index only moves on
//! `advance`.

use chrono::{DateTime, Utc};
use partyq_core::clock::Clock;
use partyq_core::error::GameError;
use partyq_core::question::Question;
use serde::Serialize;
use uuid::Uuid;

use super::settings::SessionSettings;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Players and settings recorded, no questions yet.
    Created,
    /// Questions selected, none fetched yet.
    Started,
    /// At least one question fetched.
    InProgress,
    /// Every question answered or skipped.
    Finished,
    /// Terminated by the caller before finishing.
    Ended,
}

impl SessionState {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Ended => "ended",
        }
    }

    /// `Finished` or `Ended`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Ended)
    }
}

/// Trims names, drops empty ones and removes repeats (ignoring case),
/// keeping first occurrences in order.
#[must_use]
pub fn normalize_players<I, S>(players: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roster: Vec<String> = Vec::new();
    for name in players {
        let name = name.as_ref().trim();
        let lowered = name.to_lowercase();
        if !name.is_empty() && !roster.iter().any(|existing| existing.to_lowercase() == lowered) {
            roster.push(name.to_owned());
        }
    }
    roster
}

/// Rounded `part / whole` as a whole percentage.
fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (2 * whole);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// One player group's play-through.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    game_type: String,
    players: Vec<String>,
    requested_count: u32,
    settings: SessionSettings,
    questions: Vec<Question>,
    current_index: usize,
    current_player: usize,
    state: SessionState,
    completed: u32,
    skipped: u32,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Creates a session in `Created`. Player names are normalized with
    /// [`normalize_players`]; the roster size is checked at `start`.
    #[must_use]
    pub fn new<I, S>(
        id: Uuid,
        game_type: impl Into<String>,
        players: I,
        requested_count: u32,
        settings: SessionSettings,
        clock: &dyn Clock,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id,
            game_type: game_type.into(),
            players: normalize_players(players),
            requested_count,
            settings,
            questions: Vec::new(),
            current_index: 0,
            current_player: 0,
            state: SessionState::Created,
            completed: 0,
            skipped: 0,
            created_at: clock.now(),
            started_at: None,
            finished_at: None,
            ended_at: None,
        }
    }

    fn invalid(&self, operation: &'static str) -> GameError {
        GameError::InvalidTransition {
            session_id: self.id,
            state: self.state.as_str(),
            operation,
        }
    }

    /// Fails unless the roster has at least two players.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InsufficientPlayers`.
    pub fn ensure_enough_players(&self) -> Result<(), GameError> {
        if self.players.len() < 2 {
            return Err(GameError::InsufficientPlayers {
                found: self.players.len(),
            });
        }
        Ok(())
    }

    /// Checks that `start` may be attempted: the session is `Created` and
    /// has at least two players.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` or
    /// `GameError::InsufficientPlayers`.
    pub fn ensure_startable(&self) -> Result<(), GameError> {
        if self.state != SessionState::Created {
            return Err(self.invalid("start"));
        }
        self.ensure_enough_players()
    }

    /// Moves `Created → Started` with the selected questions.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` unless the session is
    /// `Created`, `GameError::InsufficientPlayers` for a roster under two,
    /// or `GameError::NoMatchingQuestions` for an empty question list.
    pub fn start(&mut self, questions: Vec<Question>, clock: &dyn Clock) -> Result<(), GameError> {
        self.ensure_startable()?;
        if questions.is_empty() {
            return Err(GameError::NoMatchingQuestions {
                requested: self.requested_count as usize,
                available: 0,
            });
        }
        self.questions = questions;
        self.current_index = 0;
        self.current_player = 0;
        self.state = SessionState::Started;
        self.started_at = Some(clock.now());
        Ok(())
    }

    /// The question to play now, moving `Started → InProgress` on first
    /// call.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionFinished` once every question is played,
    /// or `GameError::InvalidTransition` before `start` or after `end`.
    pub fn current_question(&mut self) -> Result<&Question, GameError> {
        match self.state {
            SessionState::Started => self.state = SessionState::InProgress,
            SessionState::InProgress => {}
            SessionState::Finished => return Err(GameError::SessionFinished(self.id)),
            SessionState::Created | SessionState::Ended => {
                return Err(self.invalid("fetch question"));
            }
        }
        self.questions
            .get(self.current_index)
            .ok_or(GameError::SessionFinished(self.id))
    }

    /// Records the current question as completed or skipped, then moves to
    /// the next question and the next player. Moves to `Finished` after the
    /// last question.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionFinished` after the last question, or
    /// `GameError::InvalidTransition` before `start` or after `end`.
    pub fn advance(&mut self, completed: bool, clock: &dyn Clock) -> Result<(), GameError> {
        match self.state {
            SessionState::Started | SessionState::InProgress => {}
            SessionState::Finished => return Err(GameError::SessionFinished(self.id)),
            SessionState::Created | SessionState::Ended => return Err(self.invalid("submit")),
        }
        if completed {
            self.completed += 1;
        } else {
            self.skipped += 1;
        }
        self.current_index += 1;
        self.current_player = (self.current_player + 1) % self.players.len();
        if self.current_index >= self.questions.len() {
            self.state = SessionState::Finished;
            self.finished_at = Some(clock.now());
        } else {
            self.state = SessionState::InProgress;
        }
        Ok(())
    }

    /// Terminates a session that has not finished.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` if the session is already
    /// `Finished` or `Ended`.
    pub fn end(&mut self, clock: &dyn Clock) -> Result<(), GameError> {
        if self.state.is_terminal() {
            return Err(self.invalid("end"));
        }
        self.state = SessionState::Ended;
        self.ended_at = Some(clock.now());
        Ok(())
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Game type key.
    #[must_use]
    pub fn game_type(&self) -> &str {
        &self.game_type
    }

    /// Normalized roster, in turn order.
    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Player whose turn it is, once started and until finished.
    #[must_use]
    pub fn current_player(&self) -> Option<&str> {
        match self.state {
            SessionState::Started | SessionState::InProgress => {
                self.players.get(self.current_player).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Question count asked for at creation.
    #[must_use]
    pub fn requested_count(&self) -> u32 {
        self.requested_count
    }

    /// Settings snapshot.
    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Selected questions, in play order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of selected questions; zero before `start`.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Questions completed or skipped so far.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.current_index
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Questions marked completed.
    #[must_use]
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Questions skipped.
    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// When the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session started.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the last question was answered.
    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// When the session was ended by the caller.
    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Position of the current question: `(index + 1) / total`, rounded.
    #[must_use]
    pub fn question_progress(&self) -> u8 {
        percent(self.current_index + 1, self.questions.len())
    }

    /// Share of questions answered, rounded, held at 99 until the session
    /// is finished so that 100 means finished.
    #[must_use]
    pub fn completion_progress(&self) -> u8 {
        if self.state == SessionState::Finished {
            return 100;
        }
        percent(self.answered(), self.questions.len()).min(99)
    }
}
