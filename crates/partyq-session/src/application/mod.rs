//! Session engine and its read models.

pub mod engine;
pub mod views;
