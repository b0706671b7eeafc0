//! Command-line interface for danetka.

use clap::{Parser, Subcommand};
use danetka::LlmProvider;
use std::path::PathBuf;

/// Danetka - yes/no riddles hosted by a language model
#[derive(Parser, Debug)]
#[command(name = "danetka")]
#[command(about = "Play yes/no riddles against an LLM host", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play riddles in the terminal
    Play {
        /// Path to the TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "danetka.toml")]
        config: PathBuf,

        /// Override the games directory
        #[arg(long)]
        games_dir: Option<PathBuf>,

        /// Override the system prompt file
        #[arg(long)]
        prompt: Option<PathBuf>,

        /// Override the LLM provider
        #[arg(long, value_enum)]
        provider: Option<LlmProvider>,

        /// Override the LLM model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the games in a directory and report skipped records
    List {
        /// Directory of game JSON files
        #[arg(long, default_value = "games")]
        games_dir: PathBuf,
    },
}
