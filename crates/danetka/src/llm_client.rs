//! LLM API client abstraction for OpenAI and Anthropic.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models).
    #[value(name = "openai")]
    OpenAI,
    /// Anthropic (Claude models).
    #[value(name = "anthropic")]
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model.
    System,
    /// The human side of the conversation.
    User,
    /// Earlier model replies.
    Assistant,
}

/// One message of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(
        provider: LlmProvider,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Gets the sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    openai: OpenAIClient<OpenAIConfig>,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        let openai =
            OpenAIClient::with_config(OpenAIConfig::new().with_api_key(config.api_key.clone()));
        Self {
            config,
            openai,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion for an ordered list of chat messages.
    #[instrument(skip(self, messages), fields(provider = ?self.config.provider, model = %self.config.model, messages = messages.len()))]
    pub async fn generate(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        debug!("Generating completion");
        match self.config.provider {
            LlmProvider::OpenAI => self.generate_openai(messages).await,
            LlmProvider::Anthropic => self.generate_anthropic(messages).await,
        }
    }

    /// Generates a completion using Anthropic Claude.
    ///
    /// Anthropic takes system text as a top-level field, so system messages
    /// are joined and the rest are sent as the message list.
    #[instrument(skip(self, messages))]
    async fn generate_anthropic(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        debug!("Building Anthropic API request");
        let system = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let turns: Vec<&ChatMessage> = messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .collect();

        let request_body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": system,
            "messages": turns,
        });

        debug!("Sending request to Anthropic");
        let response = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", self.config.api_key.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Anthropic API request failed");
                LlmError::new(format!("Anthropic API request failed: {}", e))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read Anthropic response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "Anthropic API error");
            return Err(LlmError::new(format!(
                "Anthropic API error {}: {}",
                status, response_text
            )));
        }

        debug!(response_length = response_text.len(), "Parsing Anthropic response");
        let response_json: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = ?e, response = %response_text, "Failed to parse Anthropic response");
                LlmError::new(format!("Failed to parse response: {}", e))
            })?;

        let content = response_json["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                error!(response = %response_json, "No text content in Anthropic response");
                LlmError::new("No text content in Anthropic response")
            })?
            .to_string();

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using OpenAI.
    #[instrument(skip(self, messages))]
    async fn generate_openai(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        debug!("Building chat completion request");
        let messages = messages
            .iter()
            .map(to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build request");
                LlmError::new(format!("Failed to build request: {}", e))
            })?;

        debug!("Sending request to OpenAI");
        let response = self.openai.chat().create(request).await.map_err(|e| {
            error!(error = ?e, "OpenAI API error");
            LlmError::new(format!("OpenAI API error: {}", e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("No content in OpenAI response");
                LlmError::new("No content in OpenAI response")
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

fn to_openai_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage, LlmError> {
    let built = match message.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::System),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::User),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content.as_str())
            .build()
            .map(ChatCompletionRequestMessage::Assistant),
    };
    built.map_err(|e| {
        error!(error = ?e, role = ?message.role, "Failed to build message");
        LlmError::new(format!("Failed to build {:?} message: {}", message.role, e))
    })
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
