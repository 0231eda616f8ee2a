//! Session command handler.
//!
//! Replays questions against a scripted collaborator and prints the
//! resulting conversation log.

use super::{configured_mode, to_json};
use citelog_citations::{ConversationLog, Retriever, ScriptedRetriever, Session};
use citelog_core::{config::AppConfig, AppError, AppResult};
use clap::Args;
use std::path::PathBuf;

/// Shown to the user when the collaborator fails for a turn.
const RESPONSE_FAILURE_MESSAGE: &str = "回答の取得に失敗しました。";

/// Run a chat session against a scripted collaborator
#[derive(Args, Debug)]
pub struct SessionCommand {
    /// JSONL file with one `{"result": ...}` or `{"error": ...}` per line
    #[arg(short, long)]
    pub script: PathBuf,

    /// Questions to submit, in order
    #[arg(required = true)]
    pub questions: Vec<String>,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

impl SessionCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing session command");
        tracing::debug!("Session options: {:?}", self);

        let retriever = ScriptedRetriever::from_path(&self.script)?;
        let log = run_session(config, &retriever, &self.questions)?;

        tracing::info!("Session finished with {} turns", log.len());
        println!("{}", to_json(&log, self.pretty)?);
        Ok(())
    }
}

/// Submit each question in turn. Failed turns are reported and skipped.
fn run_session(
    config: &AppConfig,
    retriever: &dyn Retriever,
    questions: &[String],
) -> AppResult<ConversationLog> {
    let mut session = Session::new(config.citations.clone(), configured_mode(config)?);

    for question in questions {
        if let Err(e) = session.submit(retriever, question) {
            match e {
                AppError::Upstream(_) => {
                    eprintln!("{}", AppError::user_message(RESPONSE_FAILURE_MESSAGE))
                }
                other => return Err(other),
            }
        }
    }

    Ok(session.into_log())
}
