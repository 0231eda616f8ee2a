//! One chat session: ask the collaborator, assemble, record.

use crate::assemble::CitationAssembler;
use crate::content::Content;
use crate::log::ConversationLog;
use crate::retriever::Retriever;
use crate::types::Mode;
use citelog_core::{AppError, AppResult, CitationConfig};

/// Drives turns for a single session and owns its log.
///
/// `submit` takes `&mut self`, so turns against one session are serialized
/// by construction.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    assembler: CitationAssembler,
    log: ConversationLog,
}

impl Session {
    pub fn new(config: CitationConfig, mode: Mode) -> Self {
        Self {
            mode,
            assembler: CitationAssembler::new(config),
            log: ConversationLog::new(),
        }
    }

    /// Mode the next turn will be assembled in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode for subsequent turns. Earlier turns keep their mode.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!("Switching mode from {} to {}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// End the session and hand back its log.
    pub fn into_log(self) -> ConversationLog {
        self.log
    }

    /// Run one turn.
    ///
    /// On collaborator failure nothing is appended and the error comes back
    /// as [`AppError::Upstream`]. On success the user turn and the assistant
    /// turn are appended together.
    pub fn submit(&mut self, retriever: &dyn Retriever, input: &str) -> AppResult<&Content> {
        tracing::info!(user_message = input, application_mode = %self.mode, "User message received");

        let result = retriever.retrieve(input).map_err(|e| {
            tracing::error!("Failed to get a response from the collaborator: {}", e);
            match e {
                AppError::Upstream(_) => e,
                other => AppError::Upstream(other.to_string()),
            }
        })?;

        let content = self.assembler.assemble(self.mode, &result);

        match serde_json::to_string(&content) {
            Ok(json) => tracing::info!(
                content = %json,
                application_mode = %self.mode,
                "Assistant content assembled"
            ),
            Err(e) => tracing::warn!("Failed to serialize content for logging: {}", e),
        }

        Ok(self.log.append_exchange(input, content))
    }
}
