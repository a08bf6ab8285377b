//! CLI module for Trivia
//!
//! Provides command-line interface for:
//! - serve: Boot a store and run the HTTP API
//! - migrate: Create the PostgreSQL schema, optionally seeding categories

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{migrate, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliResult};
