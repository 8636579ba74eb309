//! partyq — game sessions and the session engine.
//!
//! The domain layer holds the session state machine, the truth/dare mix
//! and the game-mode registry. The application layer holds
//! [`SessionEngine`], the registry every caller goes through, and the view
//! types it returns.

pub mod application;
pub mod config;
pub mod domain;

pub use application::engine::SessionEngine;
pub use config::EngineConfig;
