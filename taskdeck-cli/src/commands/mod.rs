//! Subcommand implementations.

pub mod completion;
pub mod config;
pub mod route;
pub mod session;
pub mod tasks;
