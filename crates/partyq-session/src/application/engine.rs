//! The session engine: the only place sessions are created, looked up,
//! advanced and removed.
//!
//! Sessions live in a registry keyed by id. Each session sits behind its
//! own async mutex, so calls on different sessions run in parallel while
//! calls on one session are serialized. The registry lock itself is only
//! held long enough to clone or remove a handle.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::Mutex as SessionLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use partyq_catalog::{QuestionRepository, RetrievalMode};
use partyq_core::clock::{Clock, SystemClock};
use partyq_core::error::GameError;
use partyq_core::question::{Question, QuestionType};
use partyq_core::rng::{DeterministicRng, StdRngSource, shuffle};
use partyq_filters::{
    FilterComposite, LanguageFilter, LimitFilter, NoRepeatFilter, QuestionFilter,
    QuestionTypeFilter, RandomOrderFilter, SpiceFilter,
};

use crate::application::views::{
    CurrentQuestionView, SessionStatusView, SessionSummary, SubmitOutcome,
};
use crate::config::EngineConfig;
use crate::domain::commands::CreateSession;
use crate::domain::game_modes::{GameModeConfig, GameModeRegistry};
use crate::domain::selection::mix;
use crate::domain::session::{GameSession, SessionState};
use crate::domain::settings::SessionSettings;

/// A registered session plus the caller filters it was created with.
#[derive(Debug)]
struct SessionSlot {
    session: GameSession,
    extra_filters: Vec<Arc<dyn QuestionFilter>>,
}

type SessionHandle = Arc<SessionLock<SessionSlot>>;

/// Registry and orchestrator for all active sessions.
pub struct SessionEngine {
    repository: QuestionRepository,
    modes: GameModeRegistry,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn DeterministicRng>>,
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("modes", &self.modes.keys())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionEngine {
    /// Creates an engine with explicit collaborators.
    #[must_use]
    pub fn new(
        repository: QuestionRepository,
        modes: GameModeRegistry,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            repository,
            modes,
            config,
            clock,
            rng: Mutex::new(rng),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Built-in game modes, default config, system clock and an
    /// entropy-seeded RNG.
    #[must_use]
    pub fn with_defaults(repository: QuestionRepository) -> Self {
        Self::new(
            repository,
            GameModeRegistry::builtin(),
            EngineConfig::default(),
            Arc::new(SystemClock),
            Box::new(StdRngSource::from_entropy()),
        )
    }

    /// The game modes this engine accepts.
    #[must_use]
    pub fn modes(&self) -> &GameModeRegistry {
        &self.modes
    }

    fn handle(&self, session_id: Uuid) -> Result<SessionHandle, GameError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&session_id)
            .cloned()
            .ok_or(GameError::SessionNotFound(session_id))
    }

    fn remove(&self, session_id: Uuid, handle: &SessionHandle) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions
            .get(&session_id)
            .is_some_and(|existing| Arc::ptr_eq(existing, handle))
        {
            sessions.remove(&session_id);
        }
    }

    /// Registers a new session in `Created`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for an unknown game type, a
    /// question count of zero or above the configured maximum, an invalid
    /// setting, or an extra filter the game mode does not allow.
    #[instrument(skip_all, fields(game_type = %command.game_type))]
    pub fn create(&self, command: CreateSession) -> Result<Uuid, GameError> {
        let mode = self.modes.get(&command.game_type)?;
        let count = command
            .question_count
            .or(mode.default_question_count)
            .unwrap_or(self.config.default_question_count);
        if count == 0 {
            return Err(GameError::Configuration(
                "question count must be at least 1".to_owned(),
            ));
        }
        if count > self.config.max_question_count {
            return Err(GameError::Configuration(format!(
                "question count {count} exceeds maximum {}",
                self.config.max_question_count
            )));
        }
        if let Some(rejected) = command
            .extra_filters
            .iter()
            .find(|f| !mode.allows_filter(f.filter_type()))
        {
            return Err(GameError::Configuration(format!(
                "filter '{}' is not selectable in game mode {}",
                rejected.filter_type(),
                mode.key
            )));
        }
        let settings = self
            .config
            .default_settings
            .overridden_by(&command.settings)?;

        let session_id = Uuid::new_v4();
        let session = GameSession::new(
            session_id,
            mode.key.clone(),
            &command.players,
            count,
            settings,
            self.clock.as_ref(),
        );
        let slot = SessionSlot {
            session,
            extra_filters: command.extra_filters,
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id, Arc::new(SessionLock::new(slot)));

        info!(%session_id, question_count = count, "session created");
        Ok(session_id)
    }

    /// Selects the session's questions and moves it to `Started`.
    ///
    /// Truths and dares are fetched separately, mixed to the configured
    /// ratio with backfill, then shuffled.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` for an unknown or ended session,
    /// `GameError::InvalidTransition` if it was already started,
    /// `GameError::InsufficientPlayers` for a roster under two,
    /// `GameError::StoreUnavailable` if the store query fails, or
    /// `GameError::NoMatchingQuestions` if nothing matched (or, in strict
    /// mode, fewer questions than requested matched).
    #[instrument(skip_all, fields(%session_id))]
    pub async fn start(&self, session_id: Uuid) -> Result<SessionStatusView, GameError> {
        let handle = self.handle(session_id)?;
        let mut slot = handle.lock().await;
        ensure_live(&slot.session)?;
        slot.session.ensure_startable()?;

        let mode = self.modes.get(slot.session.game_type())?;
        let settings = *slot.session.settings();
        let count = slot.session.requested_count();
        let base = base_filters(mode, &slot.extra_filters, &settings);

        let truths = self.fetch_pool(&base, QuestionType::Truth, count).await?;
        let dares = self.fetch_pool(&base, QuestionType::Dare, count).await?;
        let requested = count as usize;
        let selection = mix(truths, dares, requested, settings.truth_ratio);
        if selection.backfilled > 0 {
            warn!(
                truths = selection.truths,
                dares = selection.dares,
                backfilled = selection.backfilled,
                "truth/dare ratio not met, backfilled from the other type"
            );
        }

        let available = selection.questions.len();
        if available == 0 || (settings.strict && available < requested) {
            return Err(GameError::NoMatchingQuestions {
                requested,
                available,
            });
        }
        if available < requested {
            warn!(requested, available, "starting with fewer questions than requested");
        }

        let mut questions = selection.questions;
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            shuffle(&mut questions, &mut **rng);
        }
        slot.session.start(questions, self.clock.as_ref())?;

        info!(questions = available, "session started");
        Ok(SessionStatusView::new(&slot.session))
    }

    /// Up to `count` valid questions of one type. Rows that fail validation
    /// do not count against `count`: they are excluded and the shortfall is
    /// fetched again until the pool runs out.
    async fn fetch_pool(
        &self,
        base: &FilterComposite,
        question_type: QuestionType,
        count: u32,
    ) -> Result<Vec<Question>, GameError> {
        let mut questions: Vec<Question> = Vec::new();
        let mut seen: Vec<i64> = Vec::new();
        loop {
            let wanted = count.saturating_sub(u32::try_from(questions.len()).unwrap_or(count));
            if wanted == 0 {
                break;
            }
            let filters = base
                .clone()
                .with(QuestionTypeFilter::new(question_type))
                .with(NoRepeatFilter::new(seen.iter().copied()))
                .with(RandomOrderFilter::new())
                .with(LimitFilter::new(wanted)?);
            let batch = self
                .repository
                .get_questions(&filters, RetrievalMode::AllowEmpty)
                .await?;

            let exhausted = batch.rows_fetched() < wanted as usize;
            let had_invalid = !batch.discarded.is_empty();
            seen.extend(batch.questions.iter().map(|q| q.id));
            seen.extend(batch.discarded);
            questions.extend(batch.questions);
            if exhausted || !had_invalid {
                break;
            }
        }
        Ok(questions)
    }

    /// The question in play and whose turn it is. The first call after
    /// `start` moves the session to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` for an unknown or ended session,
    /// `GameError::SessionFinished` once every question is played, or
    /// `GameError::InvalidTransition` before `start`.
    #[instrument(skip_all, fields(%session_id))]
    pub async fn current_question(
        &self,
        session_id: Uuid,
    ) -> Result<CurrentQuestionView, GameError> {
        let handle = self.handle(session_id)?;
        let mut slot = handle.lock().await;
        ensure_live(&slot.session)?;
        let question = slot.session.current_question()?.clone();
        Ok(CurrentQuestionView::new(&slot.session, &question))
    }

    /// Marks the current question completed (`true`) or skipped (`false`)
    /// and moves to the next player.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` for an unknown or ended session,
    /// `GameError::SessionFinished` once every question is played,
    /// `GameError::InvalidTransition` before `start`, or
    /// `GameError::Configuration` when skipping in a mode without skips.
    #[instrument(skip_all, fields(%session_id, completed))]
    pub async fn submit(
        &self,
        session_id: Uuid,
        completed: bool,
    ) -> Result<SubmitOutcome, GameError> {
        let handle = self.handle(session_id)?;
        let mut slot = handle.lock().await;
        ensure_live(&slot.session)?;

        let playing = matches!(
            slot.session.state(),
            SessionState::Started | SessionState::InProgress
        );
        if playing && !completed {
            let mode = self.modes.get(slot.session.game_type())?;
            if !mode.supports_skip {
                return Err(GameError::Configuration(format!(
                    "game mode {} does not allow skipping",
                    mode.key
                )));
            }
        }

        slot.session.advance(completed, self.clock.as_ref())?;
        if slot.session.state() == SessionState::Finished {
            info!(
                completed = slot.session.completed(),
                skipped = slot.session.skipped(),
                "session finished"
            );
        }
        Ok(SubmitOutcome::new(&slot.session, completed))
    }

    /// Where the session stands.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` for an unknown or ended session.
    #[instrument(skip_all, fields(%session_id))]
    pub async fn status(&self, session_id: Uuid) -> Result<SessionStatusView, GameError> {
        let handle = self.handle(session_id)?;
        let slot = handle.lock().await;
        ensure_live(&slot.session)?;
        Ok(SessionStatusView::new(&slot.session))
    }

    /// Ends the session if it is still running, removes it from the
    /// registry and returns its final summary. Works in any state,
    /// including before `start` and after `Finished`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::SessionNotFound` for an unknown or already
    /// ended session.
    #[instrument(skip_all, fields(%session_id))]
    pub async fn end(&self, session_id: Uuid) -> Result<SessionSummary, GameError> {
        let handle = self.handle(session_id)?;
        let mut slot = handle.lock().await;
        ensure_live(&slot.session)?;
        if slot.session.state() != SessionState::Finished {
            slot.session.end(self.clock.as_ref())?;
        }
        self.remove(session_id, &handle);

        info!(state = slot.session.state().as_str(), "session removed");
        Ok(SessionSummary::new(&slot.session))
    }

    /// Summaries of every registered session, oldest first.
    pub async fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut summaries = Vec::with_capacity(handles.len());
        for handle in handles {
            let slot = handle.lock().await;
            if slot.session.state() != SessionState::Ended {
                summaries.push(SessionSummary::new(&slot.session));
            }
        }
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        summaries
    }
}

/// A session that was ended is gone as far as callers are concerned, even
/// if a concurrent caller still holds its handle.
fn ensure_live(session: &GameSession) -> Result<(), GameError> {
    if session.state() == SessionState::Ended {
        return Err(GameError::SessionNotFound(session.id()));
    }
    Ok(())
}

/// Row-selection filters for a session: the mode's mandatory and default
/// filters, the caller's extra filters, then spice and language.
fn base_filters(
    mode: &GameModeConfig,
    extra_filters: &[Arc<dyn QuestionFilter>],
    settings: &SessionSettings,
) -> FilterComposite {
    let composite = std::iter::once(&mode.mandatory_filter)
        .chain(&mode.default_filters)
        .chain(extra_filters)
        .fold(FilterComposite::new(), |acc, filter| {
            acc.with_shared(Arc::clone(filter))
        });
    composite
        .with(SpiceFilter::exactly(settings.spice_level))
        .with(LanguageFilter::for_language(settings.language))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use partyq_core::query::{Predicate, SortKey};
    use partyq_core::question::{Language, SpiceLevel};
    use partyq_filters::{CategoryFilter, GameModeFilter};
    use partyq_test_support::{
        FailingQuestionStore, FixedClock, InMemoryQuestionStore, MockRng, SequenceRng, corpus,
    };
    use serde_json::json;

    use super::*;

    fn engine_over(store: Arc<InMemoryQuestionStore>) -> SessionEngine {
        engine_with_rng(store, Box::new(MockRng))
    }

    fn engine_with_rng(
        store: Arc<InMemoryQuestionStore>,
        rng: Box<dyn DeterministicRng>,
    ) -> SessionEngine {
        SessionEngine::new(
            QuestionRepository::new(store),
            GameModeRegistry::builtin(),
            EngineConfig::default(),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap())),
            rng,
        )
    }

    fn alice_and_bob() -> CreateSession {
        CreateSession::new("truth_or_dare", ["Alice", "Bob"])
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_game_type() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));

        // Act
        let result = engine.create(CreateSession::new("trivia", ["Alice", "Bob"]));

        // Assert
        assert!(matches!(result, Err(GameError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_and_oversized_counts() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));

        // Act
        let zero = engine.create(alice_and_bob().with_question_count(0));
        let oversized = engine.create(alice_and_bob().with_question_count(101));

        // Assert
        assert!(zero.is_err());
        assert!(oversized.is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_settings() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));

        // Act
        let result = engine.create(alice_and_bob().with_setting("spice_level", "extreme"));

        // Assert
        assert!(matches!(result, Err(GameError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_non_selectable_filter() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));

        // Act
        let with_mode = engine.create(alice_and_bob().with_filter(GameModeFilter::dare_only()));
        let with_limit = engine.create(alice_and_bob().with_filter(LimitFilter::new(3).unwrap()));

        // Assert
        match with_mode.unwrap_err() {
            GameError::Configuration(message) => assert!(message.contains("game_mode")),
            other => panic!("expected Configuration, got {other:?}"),
        }
        assert!(with_limit.is_err());
    }

    #[tokio::test]
    async fn test_start_queries_each_type_with_session_filters() {
        // Arrange
        let store = Arc::new(InMemoryQuestionStore::new(corpus(5, 5, "medium")));
        let engine = engine_over(store.clone());
        let id = engine
            .create(
                alice_and_bob()
                    .with_question_count(4)
                    .with_setting("spice_level", "medium")
                    .with_setting("language", "both")
                    .with_filter(CategoryFilter::new(["party"]).unwrap()),
            )
            .unwrap();

        // Act
        let status = engine.start(id).await.unwrap();

        // Assert
        assert_eq!(status.state, SessionState::Started);
        assert_eq!(status.total_questions, 4);
        let queries = store.queries();
        assert_eq!(queries.len(), 2);
        let truth_query = &queries[0];
        assert_eq!(
            truth_query.predicates(),
            &[
                Predicate::TypeIn(vec![QuestionType::Truth, QuestionType::Dare]),
                Predicate::CategoryIn(vec!["party".into()]),
                Predicate::SpiceIn(vec![SpiceLevel::Medium]),
                Predicate::TypeIn(vec![QuestionType::Truth]),
            ]
        );
        assert_eq!(truth_query.sort(), &[SortKey::BilingualFirst, SortKey::Random]);
        assert_eq!(truth_query.limit(), Some(4));
        assert_eq!(
            queries[1].predicates().last(),
            Some(&Predicate::TypeIn(vec![QuestionType::Dare]))
        );
    }

    #[tokio::test]
    async fn test_start_language_filter_restricts_single_language() {
        // Arrange
        let store = Arc::new(InMemoryQuestionStore::new(corpus(3, 3, "mild")));
        let engine = engine_over(store.clone());
        let id = engine
            .create(alice_and_bob().with_question_count(2).with_setting("language", "se"))
            .unwrap();

        // Act
        let result = engine.start(id).await;

        // Assert
        assert!(matches!(
            result,
            Err(GameError::NoMatchingQuestions { requested: 2, available: 0 })
        ));
        assert!(
            store.queries()[0]
                .predicates()
                .contains(&Predicate::LanguageIn(vec![Language::Se, Language::Both]))
        );
    }

    #[tokio::test]
    async fn test_start_shuffles_with_the_injected_rng() {
        // Arrange
        let store = Arc::new(InMemoryQuestionStore::new(corpus(4, 0, "mild")));
        let engine = engine_with_rng(store, Box::new(SequenceRng::new(vec![0, 0, 1])));
        let id = engine
            .create(CreateSession::new("truth_only", ["Alice", "Bob"]).with_question_count(4))
            .unwrap();

        // Act
        engine.start(id).await.unwrap();
        let mut order = Vec::new();
        for _ in 0..4 {
            order.push(engine.current_question(id).await.unwrap().question_id);
            engine.submit(id, true).await.unwrap();
        }

        // Assert
        // [1, 2, 3, 4] swapped at (3, 0), (2, 0), then (1, 1).
        assert_eq!(order, vec![3, 2, 4, 1]);
    }

    #[tokio::test]
    async fn test_views_serialize_with_snake_case_fields() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::new(corpus(2, 0, "mild"))));
        let id = engine
            .create(CreateSession::new("truth_only", ["Alice", "Bob"]).with_question_count(2))
            .unwrap();
        engine.start(id).await.unwrap();

        // Act
        let question = serde_json::to_value(engine.current_question(id).await.unwrap()).unwrap();
        let status = serde_json::to_value(engine.status(id).await.unwrap()).unwrap();

        // Assert
        assert_eq!(
            question,
            json!({
                "session_id": id.to_string(),
                "question_id": 2,
                "text": "truth #2",
                "question_type": "truth",
                "spice": "mild",
                "category": "party",
                "player": "Alice",
                "question_number": 1,
                "total_questions": 2,
                "progress_percent": 50,
                "finished": false,
            })
        );
        assert_eq!(status["session_id"], json!(id.to_string()));
        assert_eq!(status["game_type"], json!("truth_only"));
        assert_eq!(status["state"], json!("in_progress"));
        assert_eq!(status["players"], json!(["Alice", "Bob"]));
        assert_eq!(status["current_player"], json!("Alice"));
        assert_eq!(status["question_number"], json!(1));
        assert_eq!(status["total_questions"], json!(2));
        assert_eq!(status["started"], json!(true));
        assert_eq!(status["finished"], json!(false));
        assert_eq!(status["progress_percent"], json!(0));
        assert_eq!(status.as_object().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_start_twice_is_invalid_transition() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::new(corpus(4, 4, "mild"))));
        let id = engine.create(alice_and_bob().with_question_count(2)).unwrap();
        engine.start(id).await.unwrap();

        // Act
        let result = engine.start(id).await;

        // Assert
        assert!(matches!(
            result,
            Err(GameError::InvalidTransition { operation: "start", .. })
        ));
    }

    #[tokio::test]
    async fn test_start_with_one_player_is_insufficient_players() {
        // Arrange
        let store = Arc::new(InMemoryQuestionStore::new(corpus(4, 4, "mild")));
        let engine = engine_over(store.clone());
        let id = engine
            .create(CreateSession::new("truth_or_dare", ["Alice", " "]))
            .unwrap();

        // Act
        let result = engine.start(id).await;

        // Assert
        match result.unwrap_err() {
            GameError::InsufficientPlayers { found } => assert_eq!(found, 1),
            other => panic!("expected InsufficientPlayers, got {other:?}"),
        }
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_leaves_session_created() {
        // Arrange
        let engine = SessionEngine::new(
            QuestionRepository::new(Arc::new(FailingQuestionStore)),
            GameModeRegistry::builtin(),
            EngineConfig::default(),
            Arc::new(SystemClock),
            Box::new(MockRng),
        );
        let id = engine.create(alice_and_bob()).unwrap();

        // Act
        let result = engine.start(id).await;

        // Assert
        assert!(matches!(result, Err(GameError::StoreUnavailable(_))));
        assert_eq!(engine.status(id).await.unwrap().state, SessionState::Created);
    }

    #[tokio::test]
    async fn test_submit_before_start_is_invalid_transition() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));
        let id = engine.create(alice_and_bob()).unwrap();

        // Act
        let result = engine.submit(id, true).await;

        // Assert
        assert!(matches!(
            result,
            Err(GameError::InvalidTransition { state: "created", .. })
        ));
    }

    #[tokio::test]
    async fn test_skip_rejected_when_mode_disallows_it() {
        // Arrange
        let mut modes = GameModeRegistry::builtin();
        let strict_dares = GameModeConfig::new(
            "dare_marathon",
            Arc::new(GameModeFilter::dare_only()),
            modes.get("dare_only").unwrap().hints.clone(),
        )
        .without_skip();
        modes.register(strict_dares);
        let engine = SessionEngine::new(
            QuestionRepository::new(Arc::new(InMemoryQuestionStore::new(corpus(0, 5, "mild")))),
            modes,
            EngineConfig::default(),
            Arc::new(SystemClock),
            Box::new(MockRng),
        );
        let id = engine
            .create(CreateSession::new("dare_marathon", ["Alice", "Bob"]).with_question_count(3))
            .unwrap();
        engine.start(id).await.unwrap();

        // Act
        let skipped = engine.submit(id, false).await;
        let done = engine.submit(id, true).await.unwrap();

        // Assert
        assert!(matches!(skipped, Err(GameError::Configuration(_))));
        assert_eq!(done.answered, 1);
    }

    #[tokio::test]
    async fn test_mode_default_question_count_applies() {
        // Arrange
        let mut modes = GameModeRegistry::builtin();
        let quick = GameModeConfig::new(
            "quick_truths",
            Arc::new(GameModeFilter::truth_only()),
            modes.get("truth_only").unwrap().hints.clone(),
        )
        .with_default_question_count(3);
        modes.register(quick);
        let engine = SessionEngine::new(
            QuestionRepository::new(Arc::new(InMemoryQuestionStore::new(corpus(10, 0, "mild")))),
            modes,
            EngineConfig::default(),
            Arc::new(SystemClock),
            Box::new(MockRng),
        );
        let id = engine
            .create(CreateSession::new("quick_truths", ["Alice", "Bob"]))
            .unwrap();

        // Act
        let status = engine.start(id).await.unwrap();

        // Assert
        assert_eq!(status.total_questions, 3);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found_everywhere() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));
        let id = Uuid::new_v4();

        // Act
        let started = engine.start(id).await;
        let current = engine.current_question(id).await;
        let submitted = engine.submit(id, true).await;
        let status = engine.status(id).await;
        let ended = engine.end(id).await;

        // Assert
        assert!(matches!(started, Err(GameError::SessionNotFound(x)) if x == id));
        assert!(matches!(current, Err(GameError::SessionNotFound(_))));
        assert!(matches!(submitted, Err(GameError::SessionNotFound(_))));
        assert!(matches!(status, Err(GameError::SessionNotFound(_))));
        assert!(matches!(ended, Err(GameError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_returns_live_sessions() {
        // Arrange
        let engine = engine_over(Arc::new(InMemoryQuestionStore::default()));
        let first = engine.create(alice_and_bob()).unwrap();
        let second = engine.create(alice_and_bob()).unwrap();
        engine.end(first).await.unwrap();

        // Act
        let listed = engine.list().await;

        // Assert
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].session_id, second);
        assert_eq!(listed[0].state, SessionState::Created);
    }
}
