//! Line-based console player and presenter.

use anyhow::Result;
use danetka_core::{
    GameCatalog, GameDefinition, Hint, MAX_HINTS, Outcome, Player, Presenter, RoundEvent,
    RoundPhase, SessionEvent,
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, warn};

/// Player reading one answer per line.
pub struct ConsolePlayer<R, W> {
    lines: Lines<R>,
    prompt_out: W,
}

impl ConsolePlayer<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Reads from stdin, prompting on stdout.
    pub fn stdio() -> Self {
        Self::new(
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
    }
}

impl<R, W> ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a player over any line source and prompt sink.
    pub fn new(input: R, prompt_out: W) -> Self {
        Self {
            lines: input.lines(),
            prompt_out,
        }
    }

    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompt_out.write_all(prompt.as_bytes()).await?;
        self.prompt_out.flush().await?;
        let line = self.lines.next_line().await?;
        if line.is_none() {
            debug!("Console input closed");
        }
        Ok(line)
    }

    /// Returns the prompt sink.
    pub fn prompt_out(&self) -> &W {
        &self.prompt_out
    }
}

#[async_trait::async_trait]
impl<R, W> Player for ConsolePlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn choose_game(&mut self, _catalog: &GameCatalog) -> Result<Option<String>> {
        self.prompt("Pick a game number or type quit/exit: ").await
    }

    async fn ask(&mut self, _game: &GameDefinition) -> Result<Option<String>> {
        loop {
            let Some(line) = self.prompt("Player: ").await? else {
                return Ok(None);
            };
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
    }

    async fn play_again(&mut self) -> Result<Option<String>> {
        self.prompt("Do you want to play another game? (y/n): ").await
    }
}

/// Renders a session event as console text, or `None` for silent events.
pub fn render(event: &SessionEvent<'_>) -> Option<String> {
    let text = match event {
        SessionEvent::Welcome => "Welcome to Danetka!".to_string(),
        SessionEvent::GameList { games } => {
            let mut text = "\nAvailable games:".to_string();
            for (i, game) in games.iter().enumerate() {
                text.push_str(&format!("\n{}. {}", i + 1, game.title()));
            }
            text
        }
        SessionEvent::InvalidChoice { .. } => "Invalid choice, try again.".to_string(),
        SessionEvent::RoundStarted { game } => format!("\nRiddle: {}\n", game.riddle()),
        SessionEvent::Round(RoundEvent::Abandoned) => "Game ended by the player.\n".to_string(),
        SessionEvent::Round(RoundEvent::Answered(answer)) => {
            let mut text = format!("Host: {}", answer.reply.trim());
            match &answer.hint {
                Some(Hint::Given { count, .. }) => {
                    text.push_str(&format!("\n(hint {} of {})", count, MAX_HINTS))
                }
                Some(Hint::Exhausted) => text.push_str("\n(no more hints)"),
                None => {}
            }
            if let (Outcome::RevealSolution, Some(solution)) = (answer.outcome, &answer.solution) {
                text.push_str(&format!("\nThe hidden solution was: {}", solution));
            }
            text
        }
        SessionEvent::HostUnavailable { error } => {
            format!("The host is unavailable ({}). Please ask again.", error)
        }
        SessionEvent::RoundFinished {
            phase,
            turns,
            hints,
        } => match phase {
            RoundPhase::WonByPlayer => format!(
                "\nYou've solved the riddle in {} questions with {} of {} hints!!!\n",
                turns, hints, MAX_HINTS
            ),
            RoundPhase::RevealedAndClosed => "\nBetter luck next time.\n".to_string(),
            _ => return None,
        },
        SessionEvent::SessionEnded { summary } => format!(
            "Ending the game... ({} played, {} solved)",
            summary.rounds, summary.won
        ),
    };
    Some(text)
}

/// Presenter writing [`render`]ed events, one per line.
pub struct ConsolePresenter<W> {
    out: W,
}

impl ConsolePresenter<std::io::Stdout> {
    /// Writes to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsolePresenter<W> {
    /// Creates a presenter over any writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn out(&self) -> &W {
        &self.out
    }
}

impl<W: Write + Send> Presenter for ConsolePresenter<W> {
    fn present(&mut self, event: &SessionEvent<'_>) {
        let Some(text) = render(event) else {
            return;
        };
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to write to console");
        }
    }
}
