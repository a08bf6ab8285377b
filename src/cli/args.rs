//! CLI argument definitions using clap
//!
//! Commands:
//! - trivia serve --config <path> [--port <port>] [--in-memory]
//! - trivia migrate --config <path> [--seed]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trivia - REST backend for trivia questions and quizzes
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,

        /// Port to listen on (overrides the configuration file)
        #[arg(long)]
        port: Option<u16>,

        /// Serve from a process-local store seeded with the default categories
        #[arg(long)]
        in_memory: bool,
    },

    /// Create the database schema
    Migrate {
        /// Path to configuration file
        #[arg(long, default_value = "./trivia.json")]
        config: PathBuf,

        /// Insert the default categories if none exist
        #[arg(long)]
        seed: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
