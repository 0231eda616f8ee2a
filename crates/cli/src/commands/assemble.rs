//! Assemble command handler.
//!
//! Reads one raw generator result as JSON and prints the assembled record.

use super::{configured_mode, to_json};
use citelog_citations::{CitationAssembler, Content, RawResult};
use citelog_core::{config::AppConfig, AppError, AppResult};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Assemble one raw generator result into a content record
#[derive(Args, Debug)]
pub struct AssembleCommand {
    /// JSON file holding `{"answer": ..., "context": [...]}` ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

impl AssembleCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing assemble command");
        tracing::debug!("Assemble options: {:?}", self);

        let result = read_raw_result(&self.input)?;
        let content = assemble(config, &result)?;

        println!("{}", to_json(&content, self.pretty)?);
        Ok(())
    }
}

fn assemble(config: &AppConfig, result: &RawResult) -> AppResult<Content> {
    let mode = configured_mode(config)?;
    tracing::debug!(
        "Assembling {} context documents in {} mode",
        result.context.len(),
        mode
    );

    Ok(CitationAssembler::new(config.citations.clone()).assemble(mode, result))
}

fn read_raw_result(path: &Path) -> AppResult<RawResult> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read input {:?}: {}", path, e))
        })?
    };

    serde_json::from_str(&contents).map_err(|e| {
        AppError::Serialization(format!("Failed to parse raw result {:?}: {}", path, e))
    })
}
