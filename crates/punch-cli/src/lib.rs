//! Library interface for the punch CLI.
//!
//! Exposes the command implementations for integration testing.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{BreakAction, Cli, Commands};
pub use config::Config;
