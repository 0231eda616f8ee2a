//! Assembled content records, one per assistant turn.
//!
//! A renderer draws a block only for the fields present: an absent
//! `subChoices` or `fileInfoList` means "draw nothing", never "draw an
//! empty list".

use crate::types::{FileRef, Mode};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// Content record for one assistant turn, tagged by the mode it was built in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Content {
    Search(SearchContent),
    Inquiry(InquiryContent),
}

impl Content {
    /// Mode this record was assembled in.
    pub fn mode(&self) -> Mode {
        match self {
            Content::Search(_) => Mode::Search,
            Content::Inquiry(_) => Mode::Inquiry,
        }
    }

    /// All cited documents, in display order.
    pub fn citations(&self) -> Vec<&FileRef> {
        match self {
            Content::Search(search) => search
                .main()
                .into_iter()
                .chain(search.sub_choices())
                .collect(),
            Content::Inquiry(inquiry) => inquiry.file_info_list().unwrap_or(&[]).iter().collect(),
        }
    }
}

/// Search-mode record: where the requested information probably lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchContent {
    /// No grounding documents; only a message is shown
    NoMatch(NoMatch),

    /// A main document plus optional further candidates
    Found(SearchFound),
}

impl SearchContent {
    pub fn is_no_match(&self) -> bool {
        matches!(self, SearchContent::NoMatch(_))
    }

    /// The most relevant document, if any matched.
    pub fn main(&self) -> Option<&FileRef> {
        match self {
            SearchContent::NoMatch(_) => None,
            SearchContent::Found(found) => Some(&found.main),
        }
    }

    /// Further candidate documents; empty when the block is absent.
    pub fn sub_choices(&self) -> &[FileRef] {
        match self {
            SearchContent::Found(SearchFound { sub: Some(sub), .. }) => &sub.sub_choices,
            _ => &[],
        }
    }
}

/// Search-mode miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoMatch {
    #[serde(deserialize_with = "always_true")]
    no_match: bool,
    answer: String,
}

/// `noMatch` is a marker: only `true` is a valid value.
fn always_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    if bool::deserialize(deserializer)? {
        Ok(true)
    } else {
        Err(de::Error::invalid_value(Unexpected::Bool(false), &"true"))
    }
}

impl NoMatch {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            no_match: true,
            answer: answer.into(),
        }
    }

    /// Message shown in place of citations.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Search-mode hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFound {
    /// Caption above the main document
    pub main_message: String,

    /// Most relevant document
    pub main: FileRef,

    /// Remaining distinct candidates; absent when there are none
    #[serde(flatten)]
    pub sub: Option<SubChoices>,
}

/// Candidate documents after the main one, always non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubChoices {
    pub sub_message: String,
    pub sub_choices: Vec<FileRef>,
}

/// Inquiry-mode record: a generated answer and the documents behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryContent {
    pub answer: String,

    /// Source list; absent when the generator reported no usable grounding
    #[serde(flatten)]
    pub sources: Option<SourceList>,
}

impl InquiryContent {
    /// Cited documents, or `None` when the block is absent.
    pub fn file_info_list(&self) -> Option<&[FileRef]> {
        self.sources.as_ref().map(|s| s.file_info_list.as_slice())
    }
}

/// Deduplicated documents backing an inquiry answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceList {
    pub sources_label: String,
    pub file_info_list: Vec<FileRef>,
}
