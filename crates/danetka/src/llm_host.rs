//! Host backed by an LLM chat completion.

use crate::config::ConfigError;
use crate::llm_client::{ChatMessage, LlmClient};
use danetka_core::{ConversationContext, Host, HostError, Speaker};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Host that asks a language model, given a fixed system prompt.
///
/// Stateless between calls: the riddle, the hidden solution and the
/// transcript all come from the [`ConversationContext`].
#[derive(Debug, Clone)]
pub struct LlmHost {
    client: LlmClient,
    prompt: String,
}

impl LlmHost {
    /// Creates a host from a client and the system prompt text.
    pub fn new(client: LlmClient, prompt: impl Into<String>) -> Self {
        Self {
            client,
            prompt: prompt.into(),
        }
    }

    /// Builds the chat messages for one question.
    ///
    /// Order: system prompt, riddle, hidden solution, transcript, question.
    pub fn messages(&self, context: &ConversationContext, utterance: &str) -> Vec<ChatMessage> {
        let game = context.game();
        let mut messages = Vec::with_capacity(context.len() + 4);
        messages.push(ChatMessage::system(self.prompt.as_str()));
        messages.push(ChatMessage::system(format!("The riddle is: {}", game.riddle())));
        messages.push(ChatMessage::system(format!(
            "The hidden solution is: {}",
            game.solution()
        )));
        messages.extend(context.turns().iter().map(|turn| match turn.speaker {
            Speaker::Player => ChatMessage::user(turn.text.as_str()),
            Speaker::Host => ChatMessage::assistant(turn.text.as_str()),
        }));
        messages.push(ChatMessage::user(utterance));
        messages
    }
}

#[async_trait::async_trait]
impl Host for LlmHost {
    #[instrument(skip(self, context, utterance), fields(title = %context.game().title(), turns = context.len()))]
    async fn ask(
        &self,
        context: &ConversationContext,
        utterance: &str,
    ) -> Result<String, HostError> {
        let messages = self.messages(context, utterance);
        debug!(messages = messages.len(), "Asking host");
        self.client
            .generate(&messages)
            .await
            .map_err(|e| HostError::new(e.message))
    }
}

/// Reads the host system prompt.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable or blank.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_prompt(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::new(format!(
            "Prompt file not found: {}",
            path.display()
        )));
    }

    let prompt = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read prompt file: {}", e)))?;

    if prompt.trim().is_empty() {
        return Err(ConfigError::new(format!(
            "Prompt file is empty: {}",
            path.display()
        )));
    }

    info!(length = prompt.len(), "Prompt loaded");
    Ok(prompt)
}
