//! Session orchestration across multiple rounds.

use crate::round::is_quit;
use crate::{GameCatalog, GameDefinition, Host, RoundController, RoundError, RoundEvent, RoundPhase};
use anyhow::Result;
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Source of player input.
///
/// Every method returns `Ok(None)` once input is closed; the orchestrator
/// treats that as quitting.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Reads a game choice: a 1-based game number or a quit sentinel.
    async fn choose_game(&mut self, catalog: &GameCatalog) -> Result<Option<String>>;

    /// Reads the next question about `game`.
    async fn ask(&mut self, game: &GameDefinition) -> Result<Option<String>>;

    /// Reads the answer to "play another game?".
    async fn play_again(&mut self) -> Result<Option<String>>;
}

/// Renders session events. The core never formats user-facing text itself.
pub trait Presenter: Send {
    /// Renders one event.
    fn present(&mut self, event: &SessionEvent<'_>);
}

/// Everything the orchestrator reports to a [`Presenter`].
#[derive(Debug, Clone)]
pub enum SessionEvent<'a> {
    /// The session started.
    Welcome,
    /// Games available for selection, in catalog order.
    GameList {
        /// Catalog games.
        games: &'a [GameDefinition],
    },
    /// The last choice was rejected; the player is asked again.
    InvalidChoice {
        /// Why it was rejected.
        error: &'a ChoiceError,
    },
    /// A round started.
    RoundStarted {
        /// Game being played.
        game: &'a GameDefinition,
    },
    /// A player turn produced an event.
    Round(&'a RoundEvent),
    /// The host call failed; the player should retry the same question.
    HostUnavailable {
        /// The failure.
        error: &'a RoundError,
    },
    /// A round reached a terminal phase.
    RoundFinished {
        /// Terminal phase.
        phase: RoundPhase,
        /// Completed question/answer exchanges.
        turns: u32,
        /// Hints shown, capped at [`MAX_HINTS`](crate::MAX_HINTS).
        hints: u32,
    },
    /// The session ended.
    SessionEnded {
        /// Totals for the session.
        summary: &'a SessionSummary,
    },
}

/// A parsed game choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    /// Play the game at this zero-based index.
    Play(usize),
    /// End the session.
    Quit,
}

/// A rejected game choice.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ChoiceError {
    /// The input was neither a number nor a quit sentinel.
    #[display("Not a game number: {:?}", input)]
    NotANumber {
        /// Raw input.
        input: String,
    },
    /// The number does not name a game.
    #[display("No game number {}, pick 1 to {}", number, len)]
    OutOfRange {
        /// Requested 1-based number.
        number: usize,
        /// Catalog size.
        len: usize,
    },
}

/// Parses a 1-based game number (or a quit sentinel) against `catalog`.
///
/// # Errors
///
/// Returns [`ChoiceError`] for non-numeric input or a number outside the
/// catalog.
pub fn parse_choice(input: &str, catalog: &GameCatalog) -> Result<GameChoice, ChoiceError> {
    if is_quit(input) {
        return Ok(GameChoice::Quit);
    }

    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| ChoiceError::NotANumber {
            input: input.trim().to_string(),
        })?;

    match number.checked_sub(1) {
        Some(index) if index < catalog.len() => Ok(GameChoice::Play(index)),
        _ => Err(ChoiceError::OutOfRange {
            number,
            len: catalog.len(),
        }),
    }
}

/// Returns `true` if the answer to "play another game?" is yes.
pub fn wants_another(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Totals for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionSummary {
    /// Rounds that reached a terminal phase.
    pub rounds: u32,
    /// Rounds the player solved.
    pub won: u32,
    /// Rounds closed by revealing the solution.
    pub revealed: u32,
    /// Rounds the player quit.
    pub abandoned: u32,
}

impl SessionSummary {
    fn record(&mut self, phase: RoundPhase) {
        self.rounds += 1;
        match phase {
            RoundPhase::WonByPlayer => self.won += 1,
            RoundPhase::RevealedAndClosed => self.revealed += 1,
            RoundPhase::AbandonedByPlayer => self.abandoned += 1,
            RoundPhase::AwaitingInput | RoundPhase::AwaitingModelReply => {}
        }
    }
}

/// Runs rounds until the player stops.
///
/// Every round gets a fresh [`RoundController`] and transcript; nothing but
/// the [`SessionSummary`] survives a round.
pub struct SessionOrchestrator<'a, P, R> {
    catalog: &'a GameCatalog,
    host: &'a dyn Host,
    player: P,
    presenter: R,
}

impl<'a, P: Player, R: Presenter> SessionOrchestrator<'a, P, R> {
    /// Creates an orchestrator.
    pub fn new(catalog: &'a GameCatalog, host: &'a dyn Host, player: P, presenter: R) -> Self {
        Self {
            catalog,
            host,
            player,
            presenter,
        }
    }

    /// Runs the session loop: pick a game, play it, ask to continue.
    ///
    /// # Errors
    ///
    /// Fails only if player input fails; host failures are reported to the
    /// presenter and retried.
    #[instrument(skip(self), fields(games = self.catalog.len()))]
    pub async fn run(&mut self) -> Result<SessionSummary> {
        info!("Session started");
        self.presenter.present(&SessionEvent::Welcome);

        let mut summary = SessionSummary::default();

        while let Some(game) = self.pick_game().await? {
            let phase = self.play_round(game).await?;
            summary.record(phase);

            match self.player.play_again().await? {
                Some(answer) if wants_another(&answer) => continue,
                _ => break,
            }
        }

        info!(?summary, "Session ended");
        self.presenter
            .present(&SessionEvent::SessionEnded { summary: &summary });
        Ok(summary)
    }

    async fn pick_game(&mut self) -> Result<Option<GameDefinition>> {
        self.presenter.present(&SessionEvent::GameList {
            games: self.catalog.games(),
        });

        loop {
            let Some(input) = self.player.choose_game(self.catalog).await? else {
                debug!("Player input closed during game selection");
                return Ok(None);
            };

            match parse_choice(&input, self.catalog) {
                Ok(GameChoice::Quit) => return Ok(None),
                Ok(GameChoice::Play(index)) => return Ok(Some(self.catalog.get(index)?.clone())),
                Err(error) => {
                    debug!(%error, "Invalid game choice");
                    self.presenter
                        .present(&SessionEvent::InvalidChoice { error: &error });
                }
            }
        }
    }

    #[instrument(skip(self, game), fields(title = %game.title()))]
    async fn play_round(&mut self, game: GameDefinition) -> Result<RoundPhase> {
        let mut round = RoundController::new(self.host, game);
        self.presenter
            .present(&SessionEvent::RoundStarted { game: round.game() });

        while !round.is_over() {
            let input = self.player.ask(round.game()).await?;
            let result = match input {
                Some(utterance) => round.advance(&utterance).await,
                None => round.abandon(),
            };

            match result {
                Ok(event) => self.presenter.present(&SessionEvent::Round(&event)),
                Err(error @ RoundError::Host { .. }) => {
                    self.presenter
                        .present(&SessionEvent::HostUnavailable { error: &error });
                }
                Err(error) => return Err(error.into()),
            }
        }

        self.presenter.present(&SessionEvent::RoundFinished {
            phase: round.phase(),
            turns: round.state().turns,
            hints: round.state().hints_shown(),
        });
        Ok(round.phase())
    }

    /// Returns the presenter.
    pub fn presenter(&self) -> &R {
        &self.presenter
    }

    /// Consumes the orchestrator, returning the player and presenter.
    pub fn into_parts(self) -> (P, R) {
        (self.player, self.presenter)
    }
}
