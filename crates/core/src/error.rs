//! Error types for citelog.
//!
//! Assembly and the conversation log are total over well-formed input, so
//! the variants here cover the edges of the system: configuration, I/O,
//! serialization and the retrieval/answer collaborator.

use thiserror::Error;

/// Suffix appended to every user-facing failure message.
const ADMIN_CONTACT_SUFFIX: &str =
    "このエラーが繰り返し発生する場合は、管理者にお問い合わせください。";

/// Unified error type for citelog.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The retrieval/answer collaborator failed to produce a result
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Build the generic message shown to an end user for a failed turn.
    ///
    /// The error detail itself belongs in the log, not in front of the user.
    pub fn user_message(summary: &str) -> String {
        format!("{}\n{}", summary, ADMIN_CONTACT_SUFFIX)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
