//! Round transcript handed to the host on every question.

use crate::GameDefinition;
use serde::{Deserialize, Serialize};

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human asking questions.
    Player,
    /// The model answering them.
    Host,
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke.
    pub speaker: Speaker,
    /// What was said, verbatim.
    pub text: String,
}

impl Turn {
    /// Creates a player turn.
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
        }
    }

    /// Creates a host turn.
    pub fn host(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Host,
            text: text.into(),
        }
    }
}

/// Ordered, append-only transcript of one round.
///
/// Carries the game being played so the host can build its prompt from the
/// context alone. Only the owning [`RoundController`](crate::RoundController)
/// can append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    game: GameDefinition,
    turns: Vec<Turn>,
}

impl ConversationContext {
    /// Creates an empty transcript for `game`.
    pub fn new(game: GameDefinition) -> Self {
        Self {
            game,
            turns: Vec::new(),
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &GameDefinition {
        &self.game
    }

    /// Returns all turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}
