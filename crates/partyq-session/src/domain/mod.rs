//! Session domain model.

pub mod commands;
pub mod game_modes;
pub mod selection;
pub mod session;
pub mod settings;
