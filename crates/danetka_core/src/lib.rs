//! Danetka core - yes/no riddle game logic
//!
//! A hidden solution is known to a model-backed host; the player asks yes/no
//! questions and the host's free-text replies are classified into a fixed
//! outcome vocabulary that drives the round state machine.
//!
//! # Architecture
//!
//! - **Classifier**: pure mapping from raw reply text to an [`Outcome`]
//! - **Catalog**: validated riddle definitions loaded from a [`GameSource`]
//! - **Conversation**: the per-round transcript handed to the [`Host`]
//! - **Round**: the [`RoundController`] state machine
//! - **Session**: the [`SessionOrchestrator`] loop across rounds
//!
//! # Example
//!
//! ```no_run
//! use danetka_core::{GameCatalog, Host, RoundController, RoundEvent};
//!
//! # async fn example(host: &dyn Host) -> anyhow::Result<()> {
//! let catalog = GameCatalog::scan("games")?;
//! let mut round = RoundController::new(host, catalog.get(0)?.clone());
//!
//! if let RoundEvent::Answered(event) = round.advance("Is it alive?").await? {
//!     println!("{}: {}", event.outcome, event.reply);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
pub mod classifier;
mod conversation;
mod host;
mod round;
mod session;

// Crate-level exports - Classification
pub use classifier::{Outcome, classify, extract_hint};

// Crate-level exports - Catalog
pub use catalog::{
    CatalogError, DirectorySource, GameCatalog, GameDefinition, GameSource, MemorySource,
    SourceRecord, ValidationWarning,
};

// Crate-level exports - Conversation
pub use conversation::{ConversationContext, Speaker, Turn};

// Crate-level exports - Host
pub use host::{Host, HostError};

// Crate-level exports - Round state machine
pub use round::{
    Hint, MAX_HINTS, OutcomeEvent, QUIT_SENTINELS, RoundController, RoundError, RoundEvent,
    RoundPhase, RoundState, is_quit,
};

// Crate-level exports - Session
pub use session::{
    ChoiceError, GameChoice, Player, Presenter, SessionEvent, SessionOrchestrator,
    SessionSummary, parse_choice, wants_another,
};
