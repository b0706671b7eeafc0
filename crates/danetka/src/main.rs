//! Danetka - yes/no riddle game CLI
//!
//! Loads the game catalog and host prompt, then runs an interactive session.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use danetka::{ConsolePlayer, ConsolePresenter, GameConfig, LlmClient, LlmHost, load_prompt};
use danetka_core::{GameCatalog, SessionOrchestrator};
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            games_dir,
            prompt,
            provider,
            model,
        } => run_play(config, games_dir, prompt, provider, model).await,
        Command::List { games_dir } => run_list(games_dir),
    }
}

/// Run an interactive session
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_play(
    config: PathBuf,
    games_dir: Option<PathBuf>,
    prompt: Option<PathBuf>,
    provider: Option<danetka::LlmProvider>,
    model: Option<String>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config)?;
    if let Some(dir) = games_dir {
        config = config.with_games_dir(dir);
    }
    if let Some(path) = prompt {
        config = config.with_prompt_path(path);
    }
    if let Some(provider) = provider {
        config = config.with_llm_provider(provider);
    }
    if let Some(model) = model {
        config = config.with_llm_model(model);
    }

    // Fatal setup errors abort before any game starts.
    let llm_config = config.create_llm_config()?;
    let prompt = load_prompt(config.prompt_path())?;
    let catalog = GameCatalog::scan(config.games_dir())?;
    for warning in catalog.warnings() {
        warn!(%warning, "Game record skipped");
    }

    let host = LlmHost::new(LlmClient::new(llm_config), prompt);

    let mut session = SessionOrchestrator::new(
        &catalog,
        &host,
        ConsolePlayer::stdio(),
        ConsolePresenter::stdout(),
    );
    let summary = session.run().await?;

    info!(?summary, "Session complete");
    Ok(())
}

/// List the games in a directory
#[instrument]
fn run_list(games_dir: PathBuf) -> Result<()> {
    let catalog = GameCatalog::scan(&games_dir)?;

    for (i, game) in catalog.games().iter().enumerate() {
        println!("{}. {}", i + 1, game.title());
    }
    for warning in catalog.warnings() {
        println!("warning: {}", warning);
    }

    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
