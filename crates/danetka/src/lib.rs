//! Danetka - play yes/no riddles against a language-model host
//!
//! Wires the [`danetka_core`] state machine to real collaborators.
//!
//! # Architecture
//!
//! - **Config**: TOML game configuration and API key lookup
//! - **LLM client**: chat completions over OpenAI or Anthropic
//! - **LLM host**: the [`danetka_core::Host`] implementation
//! - **Console**: line-based player input and event rendering
//!
//! # Example
//!
//! ```no_run
//! use danetka::{ConsolePlayer, ConsolePresenter, GameConfig, LlmClient, LlmHost, load_prompt};
//! use danetka_core::{GameCatalog, SessionOrchestrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("danetka.toml")?;
//! let catalog = GameCatalog::scan(config.games_dir())?;
//! let host = LlmHost::new(
//!     LlmClient::new(config.create_llm_config()?),
//!     load_prompt(config.prompt_path())?,
//! );
//!
//! let mut session = SessionOrchestrator::new(
//!     &catalog,
//!     &host,
//!     ConsolePlayer::stdio(),
//!     ConsolePresenter::stdout(),
//! );
//! session.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod console;
mod llm_client;
mod llm_host;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - LLM client
pub use llm_client::{ChatMessage, ChatRole, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - LLM host
pub use llm_host::{LlmHost, load_prompt};

// Crate-level exports - Console
pub use console::{ConsolePlayer, ConsolePresenter, render};
