//! partyq core — shared domain types and ports.
//!
//! This crate defines the question data model, the structured query that
//! filters build up, the question store port, and the determinism
//! abstractions (clock, RNG) every other crate depends on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod query;
pub mod question;
pub mod rng;
pub mod store;
