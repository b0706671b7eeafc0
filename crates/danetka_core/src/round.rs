//! Round state machine.
//!
//! A [`RoundController`] drives one play-through of one riddle. Each call to
//! [`RoundController::advance`] is one player turn: the quit sentinel is
//! checked first, then the host is asked, the reply is classified, and the
//! counters and phase are updated. The controller never advances on its own.

use crate::classifier::{classify, extract_hint};
use crate::{ConversationContext, GameDefinition, Host, HostError, Outcome, Turn};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Player inputs that abandon the current round (or session).
pub const QUIT_SENTINELS: &[&str] = &["quit", "exit"];

/// Hints beyond this count are replaced by [`Hint::Exhausted`].
pub const MAX_HINTS: u32 = 3;

/// Returns `true` if `input` is a quit sentinel, ignoring case and
/// surrounding whitespace.
pub fn is_quit(input: &str) -> bool {
    let input = input.trim();
    QUIT_SENTINELS
        .iter()
        .any(|sentinel| input.eq_ignore_ascii_case(sentinel))
}

/// Phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RoundPhase {
    /// Waiting for the next player question.
    AwaitingInput,
    /// A host call is in flight.
    AwaitingModelReply,
    /// The player solved the riddle.
    WonByPlayer,
    /// The host revealed the solution.
    RevealedAndClosed,
    /// The player quit.
    AbandonedByPlayer,
}

impl RoundPhase {
    /// Returns `true` for phases with no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RoundPhase::WonByPlayer | RoundPhase::RevealedAndClosed | RoundPhase::AbandonedByPlayer
        )
    }
}

/// Counters of a round. They only ever grow and `is_over` flips once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    /// Replies that carried a hint, including ones past the cap. Use
    /// [`RoundState::hints_shown`] for anything shown to the player.
    pub hints_given: u32,
    /// Completed question/answer exchanges.
    pub turns: u32,
    /// Set when the round enters a terminal phase.
    pub is_over: bool,
}

impl RoundState {
    /// Hints actually shown to the player, never above [`MAX_HINTS`].
    pub fn hints_shown(&self) -> u32 {
        self.hints_given.min(MAX_HINTS)
    }
}

/// Hint metadata attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Hint {
    /// A hint within the cap.
    Given {
        /// Hint text from the host.
        text: String,
        /// Hints given so far, never above [`MAX_HINTS`].
        count: u32,
    },
    /// The cap was reached; the hint text is withheld.
    Exhausted,
}

/// Structured result of one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    /// Classified reply.
    pub outcome: Outcome,
    /// Raw host reply.
    pub reply: String,
    /// Hint metadata, if the reply carried any.
    pub hint: Option<Hint>,
    /// Hidden solution, set only for [`Outcome::RevealSolution`].
    pub solution: Option<String>,
}

impl OutcomeEvent {
    /// Returns the hint text, if one is shown.
    pub fn hint_text(&self) -> Option<&str> {
        match &self.hint {
            Some(Hint::Given { text, .. }) => Some(text),
            _ => None,
        }
    }

    /// Returns the displayed hint count, if a hint is shown.
    pub fn hint_count(&self) -> Option<u32> {
        match &self.hint {
            Some(Hint::Given { count, .. }) => Some(*count),
            _ => None,
        }
    }
}

/// What one call to [`RoundController::advance`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    /// The host answered.
    Answered(OutcomeEvent),
    /// The player quit; no host call was made.
    Abandoned,
}

/// Round errors.
#[derive(Debug, Clone, Display, Error)]
pub enum RoundError {
    /// The host call failed; the turn was not consumed.
    #[display("Host unavailable, try again: {}", source)]
    Host {
        /// Underlying host failure.
        source: HostError,
    },

    /// The round already ended. Calling `advance` again is a caller bug.
    #[display("Round is already over ({})", phase)]
    AlreadyOver {
        /// Terminal phase the round ended in.
        phase: RoundPhase,
    },
}

/// Drives one round of one riddle.
pub struct RoundController<'h> {
    host: &'h dyn Host,
    context: ConversationContext,
    phase: RoundPhase,
    state: RoundState,
}

impl std::fmt::Debug for RoundController<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("title", self.context.game().title())
            .field("phase", &self.phase)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'h> RoundController<'h> {
    /// Starts a round of `game` with an empty transcript.
    #[instrument(skip(host, game), fields(title = %game.title()))]
    pub fn new(host: &'h dyn Host, game: GameDefinition) -> Self {
        info!("Starting round");
        Self {
            host,
            context: ConversationContext::new(game),
            phase: RoundPhase::AwaitingInput,
            state: RoundState::default(),
        }
    }

    /// Processes one player turn.
    ///
    /// A quit sentinel ends the round without calling the host. Otherwise
    /// the host is asked; on success the question and reply are appended to
    /// the transcript and the classified reply decides the next phase.
    ///
    /// # Errors
    ///
    /// [`RoundError::Host`] if the host call failed. The round is left
    /// exactly as it was, so the same question can be retried.
    /// [`RoundError::AlreadyOver`] if the round is in a terminal phase.
    #[instrument(skip(self, utterance), fields(title = %self.context.game().title(), turn = self.state.turns))]
    pub async fn advance(&mut self, utterance: &str) -> Result<RoundEvent, RoundError> {
        if self.phase.is_terminal() {
            warn!(phase = %self.phase, "Advance called on finished round");
            return Err(RoundError::AlreadyOver { phase: self.phase });
        }

        if is_quit(utterance) {
            return self.abandon();
        }

        // A dropped advance future can leave AwaitingModelReply behind; nothing
        // was appended in that case, so it is safe to ask again.
        self.phase = RoundPhase::AwaitingModelReply;
        let reply = match self.host.ask(&self.context, utterance).await {
            Ok(reply) => reply,
            Err(source) => {
                warn!(error = %source, "Host call failed, turn not consumed");
                self.phase = RoundPhase::AwaitingInput;
                return Err(RoundError::Host { source });
            }
        };

        self.context.push(Turn::player(utterance));
        self.context.push(Turn::host(reply.as_str()));
        self.state.turns += 1;

        let outcome = classify(&reply);
        let mut event = OutcomeEvent {
            outcome,
            reply,
            hint: None,
            solution: None,
        };

        match outcome {
            Outcome::Win => self.finish(RoundPhase::WonByPlayer),
            Outcome::RevealSolution => {
                event.solution = Some(self.context.game().solution().clone());
                self.finish(RoundPhase::RevealedAndClosed);
            }
            Outcome::Yes | Outcome::No | Outcome::Invalid => {
                self.phase = RoundPhase::AwaitingInput;
                event.hint = extract_hint(&event.reply).map(|text| self.record_hint(text));
            }
        }

        debug!(%outcome, phase = %self.phase, "Turn complete");
        Ok(RoundEvent::Answered(event))
    }

    /// Ends the round on the player's behalf without asking the host.
    ///
    /// # Errors
    ///
    /// [`RoundError::AlreadyOver`] if the round is in a terminal phase.
    pub fn abandon(&mut self) -> Result<RoundEvent, RoundError> {
        if self.phase.is_terminal() {
            return Err(RoundError::AlreadyOver { phase: self.phase });
        }
        self.finish(RoundPhase::AbandonedByPlayer);
        Ok(RoundEvent::Abandoned)
    }

    fn record_hint(&mut self, text: String) -> Hint {
        self.state.hints_given = self.state.hints_given.saturating_add(1);
        if self.state.hints_given <= MAX_HINTS {
            debug!(count = self.state.hints_given, "Hint given");
            Hint::Given {
                text,
                count: self.state.hints_given,
            }
        } else {
            debug!(count = self.state.hints_given, "Hint cap reached");
            Hint::Exhausted
        }
    }

    fn finish(&mut self, phase: RoundPhase) {
        debug_assert!(phase.is_terminal());
        debug_assert!(!self.state.is_over);
        info!(%phase, turns = self.state.turns, hints = self.state.hints_given, "Round over");
        self.phase = phase;
        self.state.is_over = true;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns the counters.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Returns `true` once the round reached a terminal phase.
    pub fn is_over(&self) -> bool {
        self.state.is_over
    }

    /// Returns the transcript.
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Returns the game being played.
    pub fn game(&self) -> &GameDefinition {
        self.context.game()
    }

    /// Consumes the round, returning its transcript.
    pub fn into_context(self) -> ConversationContext {
        self.context
    }
}
