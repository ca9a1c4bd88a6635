//! Command implementations for the CLI surface

pub mod history;
pub mod setup;
pub mod show;
pub mod update;
