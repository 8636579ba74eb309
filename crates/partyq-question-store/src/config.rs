//! Store connection settings read from the environment.

use partyq_core::error::GameError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the question corpus lives and how many connections to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `sqlx` connection string, e.g. `sqlite://questions.db`.
    pub database_url: String,
    /// Pool size.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Reads `DATABASE_URL` and `PARTYQ_DB_MAX_CONNECTIONS`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if `DATABASE_URL` is unset or the
    /// connection count is not a positive integer.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            GameError::Configuration("DATABASE_URL environment variable must be set".to_owned())
        })?;
        let max_connections = match lookup("PARTYQ_DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    GameError::Configuration(format!(
                        "PARTYQ_DB_MAX_CONNECTIONS must be a positive integer, got '{raw}'"
                    ))
                })?,
        };
        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
