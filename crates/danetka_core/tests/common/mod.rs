//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use danetka_core::{
    ConversationContext, GameCatalog, GameDefinition, Host, HostError, MemorySource, Player,
    Presenter, RoundPhase, SessionEvent, Turn,
};

/// One observed host call: the transcript it saw and the question.
#[derive(Debug, Clone)]
pub struct HostCall {
    pub title: String,
    pub history: Vec<Turn>,
    pub utterance: String,
}

/// Host that replays canned replies in order and records every call.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    replies: Mutex<VecDeque<Result<String, HostError>>>,
    calls: Mutex<Vec<HostCall>>,
}

impl ScriptedHost {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a failing call.
    pub fn then_fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(HostError::new(message)));
        self
    }

    /// Queues a successful call.
    pub fn then_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Host for ScriptedHost {
    async fn ask(
        &self,
        context: &ConversationContext,
        utterance: &str,
    ) -> Result<String, HostError> {
        self.calls.lock().unwrap().push(HostCall {
            title: context.game().title().clone(),
            history: context.turns().to_vec(),
            utterance: utterance.to_string(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HostError::new("script exhausted")))
    }
}

/// Player that reads from three scripted input queues.
#[derive(Debug, Default)]
pub struct ScriptedPlayer {
    pub choices: VecDeque<String>,
    pub questions: VecDeque<String>,
    pub continues: VecDeque<String>,
}

impl ScriptedPlayer {
    pub fn new(choices: &[&str], questions: &[&str], continues: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            choices: owned(choices),
            questions: owned(questions),
            continues: owned(continues),
        }
    }
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn choose_game(&mut self, _catalog: &GameCatalog) -> anyhow::Result<Option<String>> {
        Ok(self.choices.pop_front())
    }

    async fn ask(&mut self, _game: &GameDefinition) -> anyhow::Result<Option<String>> {
        Ok(self.questions.pop_front())
    }

    async fn play_again(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.continues.pop_front())
    }
}

/// Presenter that records a short tag per event.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<String>,
    /// Phase, turns and hints of every finished round.
    pub finished: Vec<(RoundPhase, u32, u32)>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, event: &SessionEvent<'_>) {
        let tag = match event {
            SessionEvent::Welcome => "welcome".to_string(),
            SessionEvent::GameList { games } => format!("list:{}", games.len()),
            SessionEvent::InvalidChoice { .. } => "invalid_choice".to_string(),
            SessionEvent::RoundStarted { game } => format!("start:{}", game.title()),
            SessionEvent::Round(event) => format!("round:{:?}", event),
            SessionEvent::HostUnavailable { .. } => "host_unavailable".to_string(),
            SessionEvent::RoundFinished {
                phase,
                turns,
                hints,
            } => {
                self.finished.push((*phase, *turns, *hints));
                format!("finished:{}", phase)
            }
            SessionEvent::SessionEnded { summary } => format!("ended:{}", summary.rounds),
        };
        self.events.push(tag);
    }
}

pub fn game(title: &str) -> GameDefinition {
    GameDefinition::new(
        title,
        format!("Riddle of {}", title),
        format!("Solution of {}", title),
    )
    .expect("valid game")
}

pub fn record(title: &str) -> String {
    format!(
        r#"{{"title": "{title}", "riddle": "Riddle of {title}", "solution": "Solution of {title}"}}"#
    )
}

pub fn catalog(titles: &[&str]) -> GameCatalog {
    let source = titles
        .iter()
        .fold(MemorySource::new(), |source, title| source.with_record(record(title)));
    GameCatalog::load(&source).expect("valid catalog")
}
