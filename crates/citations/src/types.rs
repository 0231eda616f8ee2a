//! Citation data model.
//!
//! Input types mirror what the retrieval/answer generator hands back; output
//! types are display-ready and consumed as-is by a renderer.

use citelog_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A page locator as reported by a document loader.
///
/// Loaders normally report an integer, but some emit markers such as `"iv"`
/// or `"cover"`, floats, or booleans. None of those are rejected: a page is
/// display-only and must never fail a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageValue {
    /// Integer page index
    Number(i64),

    /// Text the loader emitted, including numeric strings
    Text(String),

    /// Any other JSON scalar (floats, booleans, integers beyond `i64`)
    Other(serde_json::Value),
}

impl PageValue {
    /// Integer reading of the page, if it has one.
    ///
    /// Whole-number floats count (`3.0` reads as 3). Fractional floats,
    /// booleans, and values outside `i64` do not.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PageValue::Number(n) => Some(*n),
            PageValue::Text(s) => s.trim().parse().ok(),
            PageValue::Other(value) => value
                .as_i64()
                .or_else(|| value.as_f64().and_then(whole_number)),
        }
    }
}

/// `f` as an `i64` when it is integral and in range.
fn whole_number(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; i64::MAX as f64 rounds up to it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

impl fmt::Display for PageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageValue::Number(n) => write!(f, "{}", n),
            PageValue::Text(s) => f.write_str(s),
            PageValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for PageValue {
    fn from(n: i64) -> Self {
        PageValue::Number(n)
    }
}

impl From<i32> for PageValue {
    fn from(n: i32) -> Self {
        PageValue::Number(n.into())
    }
}

impl From<u32> for PageValue {
    fn from(n: u32) -> Self {
        PageValue::Number(n.into())
    }
}

impl From<&str> for PageValue {
    fn from(s: &str) -> Self {
        PageValue::Text(s.to_string())
    }
}

/// A document the retriever matched, in relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Path or name of the originating document
    pub source: String,

    /// 0-based page index as reported by the loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageValue>,
}

impl RetrievedDocument {
    /// Create a document reference without a page.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            page: None,
        }
    }

    /// Attach the loader's raw page value.
    pub fn with_page(mut self, page: impl Into<PageValue>) -> Self {
        self.page = Some(page.into());
        self
    }
}

/// Raw output of the retrieval/answer generator for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    /// Generated answer, possibly one of the no-match sentinels
    pub answer: String,

    /// Matched documents, most relevant first
    #[serde(default)]
    pub context: Vec<RetrievedDocument>,
}

impl RawResult {
    pub fn new(answer: impl Into<String>, context: Vec<RetrievedDocument>) -> Self {
        Self {
            answer: answer.into(),
            context,
        }
    }
}

/// Response mode chosen by the user for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Locate the documents that hold the requested information
    Search,

    /// Answer the question from document contents, citing sources
    Inquiry,
}

impl Mode {
    /// All modes, in the order they are offered to the user.
    pub const ALL: [Mode; 2] = [Mode::Search, Mode::Inquiry];

    /// Config and CLI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Search => "search",
            Mode::Inquiry => "inquiry",
        }
    }

    /// Label shown to the user when picking a mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Search => "社内文書検索",
            Mode::Inquiry => "社内問い合わせ",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::Search => "入力内容と関連性が高い社内文書のありかを検索できます。",
            Mode::Inquiry => "質問・要望に対して、社内文書の情報をもとに回答を得られます。",
        }
    }

    /// Sample input for the mode.
    pub fn example(self) -> &'static str {
        match self {
            Mode::Search => "社員の育成方針に関するMTGの議事録",
            Mode::Inquiry => "人事部に所属している従業員情報を一覧化して",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" => Ok(Mode::Search),
            "inquiry" => Ok(Mode::Inquiry),
            other => Err(AppError::Config(format!(
                "Unknown mode: {}. Supported: search, inquiry",
                other
            ))),
        }
    }
}

/// Broad kind of a cited source, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Web page
    Link,

    /// File in the document store
    Document,
}

/// Display-ready reference to a cited document.
///
/// `page` is 1-based when numeric. Non-numeric loader markers are carried
/// through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageValue>,
}

impl FileRef {
    pub fn kind(&self) -> SourceKind {
        if self.source.starts_with("http://") || self.source.starts_with("https://") {
            SourceKind::Link
        } else {
            SourceKind::Document
        }
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.page {
            Some(page) => write!(f, "{} (ページNo.{})", self.source, page),
            None => f.write_str(&self.source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_value_deserializes_number_and_text() {
        let doc: RetrievedDocument =
            serde_json::from_str(r#"{"source": "a.pdf", "page": 3}"#).unwrap();
        assert_eq!(doc.page, Some(PageValue::Number(3)));

        let doc: RetrievedDocument =
            serde_json::from_str(r#"{"source": "a.pdf", "page": "iv"}"#).unwrap();
        assert_eq!(doc.page, Some(PageValue::Text("iv".to_string())));

        let doc: RetrievedDocument = serde_json::from_str(r#"{"source": "a.pdf"}"#).unwrap();
        assert_eq!(doc.page, None);
    }

    #[test]
    fn test_page_value_accepts_any_scalar() {
        let result: RawResult = serde_json::from_str(
            r#"{"answer": "a", "context": [
                {"source": "a.pdf", "page": 3.0},
                {"source": "b.pdf", "page": true},
                {"source": "c.pdf", "page": 18446744073709551615},
                {"source": "d.pdf", "page": null}
            ]}"#,
        )
        .unwrap();

        let pages: Vec<_> = result.context.iter().map(|d| d.page.clone()).collect();
        assert_eq!(
            pages,
            vec![
                Some(PageValue::Other(serde_json::json!(3.0))),
                Some(PageValue::Other(serde_json::json!(true))),
                Some(PageValue::Other(serde_json::json!(18446744073709551615u64))),
                None,
            ]
        );
    }

    #[test]
    fn test_page_value_as_integer() {
        assert_eq!(PageValue::Number(4).as_integer(), Some(4));
        assert_eq!(PageValue::from(" 12 ").as_integer(), Some(12));
        assert_eq!(PageValue::Other(serde_json::json!(3.0)).as_integer(), Some(3));
        assert_eq!(PageValue::Other(serde_json::json!(3.5)).as_integer(), None);
        assert_eq!(PageValue::Other(serde_json::json!(true)).as_integer(), None);
        assert_eq!(PageValue::Other(serde_json::json!(1e300)).as_integer(), None);
        assert_eq!(
            PageValue::Other(serde_json::json!(18446744073709551615u64)).as_integer(),
            None
        );
    }

    #[test]
    fn test_other_page_round_trips_verbatim() {
        let doc: RetrievedDocument =
            serde_json::from_str(r#"{"source": "a.pdf", "page": false}"#).unwrap();
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            serde_json::json!({"source": "a.pdf", "page": false})
        );
        assert_eq!(doc.page.map(|p| p.to_string()), Some("false".to_string()));
    }

    #[test]
    fn test_raw_result_context_defaults_to_empty() {
        let result: RawResult = serde_json::from_str(r#"{"answer": "ok"}"#).unwrap();
        assert!(result.context.is_empty());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("search".parse::<Mode>().unwrap(), Mode::Search);
        assert_eq!(" Inquiry ".parse::<Mode>().unwrap(), Mode::Inquiry);
        assert!(matches!("chat".parse::<Mode>(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Inquiry).unwrap(), "\"inquiry\"");
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_file_ref_kind() {
        let link = FileRef {
            source: "https://intranet.example.com/policy".to_string(),
            page: None,
        };
        let doc = FileRef {
            source: "data/policy.pdf".to_string(),
            page: None,
        };
        assert_eq!(link.kind(), SourceKind::Link);
        assert_eq!(doc.kind(), SourceKind::Document);
    }

    #[test]
    fn test_file_ref_display() {
        let with_page = FileRef {
            source: "a.pdf".to_string(),
            page: Some(PageValue::Number(2)),
        };
        let without_page = FileRef {
            source: "b.docx".to_string(),
            page: None,
        };
        assert_eq!(with_page.to_string(), "a.pdf (ページNo.2)");
        assert_eq!(without_page.to_string(), "b.docx");
    }
}
