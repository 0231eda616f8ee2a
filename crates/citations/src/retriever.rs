//! The retrieval/answer collaborator seam.
//!
//! The real collaborator (vector search plus LLM) lives outside this crate.
//! [`ScriptedRetriever`] replays canned results from a JSONL file so that
//! sessions can be driven without one.

use crate::types::RawResult;
use citelog_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Produces a raw answer and matched documents for a question.
pub trait Retriever {
    /// Answer `query`, or fail with [`AppError::Upstream`].
    fn retrieve(&self, query: &str) -> AppResult<RawResult>;
}

impl<F> Retriever for F
where
    F: Fn(&str) -> AppResult<RawResult>,
{
    fn retrieve(&self, query: &str) -> AppResult<RawResult> {
        self(query)
    }
}

/// One canned collaborator response.
///
/// Serialized as `{"result": {...}}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEntry {
    Result(RawResult),
    Error(String),
}

/// Collaborator that answers from a fixed script, one entry per call.
#[derive(Debug, Default)]
pub struct ScriptedRetriever {
    entries: RefCell<VecDeque<ScriptEntry>>,
}

impl ScriptedRetriever {
    pub fn new(entries: impl IntoIterator<Item = ScriptEntry>) -> Self {
        Self {
            entries: RefCell::new(entries.into_iter().collect()),
        }
    }

    /// Parse a JSONL script. Blank lines are skipped.
    pub fn from_jsonl(contents: &str) -> AppResult<Self> {
        Self::from_reader(contents.as_bytes())
    }

    /// Load a JSONL script from disk.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open script {:?}: {}", path, e))
        })?;

        let retriever = Self::from_reader(BufReader::new(file))?;
        tracing::debug!("Loaded {} script entries from {:?}", retriever.remaining(), path);
        Ok(retriever)
    }

    fn from_reader(reader: impl BufRead) -> AppResult<Self> {
        let mut entries = VecDeque::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ScriptEntry = serde_json::from_str(&line).map_err(|e| {
                AppError::Serialization(format!(
                    "Failed to parse script line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push_back(entry);
        }

        Ok(Self {
            entries: RefCell::new(entries),
        })
    }

    /// Number of entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl Retriever for ScriptedRetriever {
    fn retrieve(&self, query: &str) -> AppResult<RawResult> {
        let entry = self.entries.borrow_mut().pop_front();

        match entry {
            Some(ScriptEntry::Result(result)) => Ok(result),
            Some(ScriptEntry::Error(message)) => Err(AppError::Upstream(message)),
            None => Err(AppError::Upstream(format!(
                "Script exhausted before question: {}",
                query
            ))),
        }
    }
}
