//! `SQLite` implementation of the `QuestionStore` trait.

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

use partyq_core::error::GameError;
use partyq_core::query::QuestionQuery;
use partyq_core::store::{QuestionRow, QuestionStore};

use crate::config::StoreConfig;
use crate::schema::CREATE_QUESTIONS_TABLE;
use crate::sql::{self, SqlParam};

/// SQLite-backed question store.
#[derive(Debug, Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::StoreUnavailable` if the database cannot be opened.
    pub async fn connect(config: &StoreConfig) -> Result<Self, GameError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(unavailable)?;
        info!(
            max_connections = config.max_connections,
            "connected to question store"
        );
        Ok(Self { pool })
    }

    /// Creates the questions table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `GameError::StoreUnavailable` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), GameError> {
        sqlx::raw_sql(CREATE_QUESTIONS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    /// Inserts rows as given, keeping their identifiers. Used to load a
    /// corpus into a fresh database.
    ///
    /// # Errors
    ///
    /// Returns `GameError::StoreUnavailable` if any insert fails; rows
    /// inserted before the failure are rolled back.
    pub async fn insert_rows(&self, rows: &[QuestionRow]) -> Result<(), GameError> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;
        for row in rows {
            sqlx::query(
                "INSERT INTO questions \
                 (id, text_en, text_se, category, question_type, spice_level, language) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(row.id)
            .bind(row.text_en.as_deref())
            .bind(row.text_se.as_deref())
            .bind(row.category.as_deref())
            .bind(row.question_type.as_deref())
            .bind(row.spice_level.as_deref())
            .bind(row.language.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(unavailable)?;
        }
        tx.commit().await.map_err(unavailable)?;
        debug!(rows = rows.len(), "inserted question rows");
        Ok(())
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[allow(clippy::needless_pass_by_value)]
fn unavailable(err: sqlx::Error) -> GameError {
    GameError::StoreUnavailable(err.to_string())
}

fn bind_params(sql: &str, params: Vec<SqlParam>) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    params
        .into_iter()
        .fold(sqlx::query(sql), |query, param| match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Int(value) => query.bind(value),
        })
}

fn to_question_row(row: &SqliteRow) -> Result<QuestionRow, sqlx::Error> {
    Ok(QuestionRow {
        id: row.try_get("id")?,
        text_en: row.try_get("text_en")?,
        text_se: row.try_get("text_se")?,
        category: row.try_get("category")?,
        question_type: row.try_get("question_type")?,
        spice_level: row.try_get("spice_level")?,
        language: row.try_get("language")?,
    })
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    #[instrument(skip(self, query))]
    async fn fetch_rows(&self, query: &QuestionQuery) -> Result<Vec<QuestionRow>, GameError> {
        let rendered = sql::render_select(query);
        debug!(sql = %rendered.sql, params = rendered.params.len(), "fetching questions");
        let rows = bind_params(&rendered.sql, rendered.params)
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.iter()
            .map(to_question_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(unavailable)
    }

    #[instrument(skip(self, query))]
    async fn count_rows(&self, query: &QuestionQuery) -> Result<u64, GameError> {
        let rendered = sql::render_count(query);
        debug!(sql = %rendered.sql, params = rendered.params.len(), "counting questions");
        let row = bind_params(&rendered.sql, rendered.params)
            .fetch_one(&self.pool)
            .await
            .map_err(unavailable)?;
        let count: i64 = row.try_get(0).map_err(unavailable)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
