//! Citation assembly.
//!
//! Turns the generator's raw answer and matched documents into a content
//! record: sentinel answers become data, duplicate sources are dropped
//! (first occurrence wins), and 0-based loader pages become 1-based.

use crate::content::{
    Content, InquiryContent, NoMatch, SearchContent, SearchFound, SourceList, SubChoices,
};
use crate::types::{FileRef, Mode, PageValue, RawResult, RetrievedDocument};
use citelog_core::CitationConfig;
use std::collections::HashSet;

/// Builds content records from raw generator output.
///
/// Assembly never fails: every well-formed [`RawResult`] maps to a record.
#[derive(Debug, Clone, Default)]
pub struct CitationAssembler {
    config: CitationConfig,
}

impl CitationAssembler {
    pub fn new(config: CitationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CitationConfig {
        &self.config
    }

    /// Assemble a record for the given mode.
    pub fn assemble(&self, mode: Mode, result: &RawResult) -> Content {
        match mode {
            Mode::Search => Content::Search(self.assemble_search(result)),
            Mode::Inquiry => Content::Inquiry(self.assemble_inquiry(result)),
        }
    }

    /// Assemble a search-mode record.
    ///
    /// A search answer without any grounding document is reported as a miss,
    /// whatever the answer text says.
    pub fn assemble_search(&self, result: &RawResult) -> SearchContent {
        let Some((first, rest)) = result.context.split_first() else {
            tracing::debug!("Search result has no context documents");
            return SearchContent::NoMatch(NoMatch::new(self.config.no_doc_match_text()));
        };

        if result.answer == self.config.no_doc_match_answer {
            tracing::debug!("Search answer is the no-document-match sentinel");
            return SearchContent::NoMatch(NoMatch::new(self.config.no_doc_match_text()));
        }

        let main = file_ref(first);
        let sub_choices = dedup_by_source(rest, Some(main.source.as_str()));

        tracing::debug!(
            "Assembled search record: main={}, {} sub choices from {} documents",
            main.source,
            sub_choices.len(),
            result.context.len()
        );

        let sub = (!sub_choices.is_empty()).then(|| SubChoices {
            sub_message: self.config.sub_message.clone(),
            sub_choices,
        });

        SearchContent::Found(SearchFound {
            main_message: self.config.main_message.clone(),
            main,
            sub,
        })
    }

    /// Assemble an inquiry-mode record.
    ///
    /// The source list is dropped entirely when the answer is the
    /// no-inquiry-match sentinel, even if documents came back with it.
    pub fn assemble_inquiry(&self, result: &RawResult) -> InquiryContent {
        let sources = if result.answer == self.config.inquiry_no_match_answer {
            tracing::debug!(
                "Inquiry answer is the no-match sentinel, omitting {} context documents",
                result.context.len()
            );
            None
        } else {
            Some(SourceList {
                sources_label: self.config.sources_label.clone(),
                file_info_list: dedup_by_source(&result.context, None),
            })
        };

        InquiryContent {
            answer: result.answer.clone(),
            sources,
        }
    }
}

/// Convert a loader page to its display form.
///
/// Integers, strings that parse as integers, and whole-number floats are
/// shifted from 0-based to 1-based. Anything else is passed through unchanged.
pub fn normalize_page(page: &PageValue) -> PageValue {
    match page.as_integer().and_then(|n| n.checked_add(1)) {
        Some(n) => PageValue::Number(n),
        None => {
            tracing::info!("Passing through non-numeric page value: {}", page);
            page.clone()
        }
    }
}

fn file_ref(document: &RetrievedDocument) -> FileRef {
    FileRef {
        source: document.source.clone(),
        page: document.page.as_ref().map(normalize_page),
    }
}

/// Keep the first document per source, in order, skipping `exclude`.
fn dedup_by_source<'a>(
    documents: impl IntoIterator<Item = &'a RetrievedDocument>,
    exclude: Option<&str>,
) -> Vec<FileRef> {
    let mut seen: HashSet<&str> = exclude.into_iter().collect();

    documents
        .into_iter()
        .filter(|doc| seen.insert(doc.source.as_str()))
        .map(file_ref)
        .collect()
}
