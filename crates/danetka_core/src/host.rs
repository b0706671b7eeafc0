//! The model-backed host that answers questions.

use crate::ConversationContext;
use derive_more::{Display, Error};
use tracing::{error, instrument};

/// Answers player questions about the riddle in `context`.
///
/// Implementations receive the transcript by shared reference and must not
/// keep state between calls: everything a host needs is in the context.
#[async_trait::async_trait]
pub trait Host: Send + Sync {
    /// Returns the raw reply to `utterance`, given the transcript so far.
    ///
    /// `context` does not yet contain `utterance`.
    async fn ask(
        &self,
        context: &ConversationContext,
        utterance: &str,
    ) -> Result<String, HostError>;
}

/// A failed host call. The player may retry the same question.
#[derive(Debug, Clone, Display, Error)]
#[display("Host error: {} at {}:{}", message, file, line)]
pub struct HostError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HostError {
    /// Creates a new host error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Host error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
