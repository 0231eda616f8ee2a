//! Citation assembly and conversation logging.
//!
//! Turns the raw output of a retrieval-augmented answer generator into
//! display-ready citation records, and keeps the append-only log of a chat
//! session built from them.
//!
//! # Example
//! ```
//! use citelog_citations::{CitationAssembler, Mode, RawResult, RetrievedDocument};
//!
//! let assembler = CitationAssembler::default();
//! let result = RawResult::new(
//!     "The policy is in the handbook.",
//!     vec![RetrievedDocument::new("handbook.pdf").with_page(0)],
//! );
//! let content = assembler.assemble(Mode::Inquiry, &result);
//! assert_eq!(content.citations()[0].to_string(), "handbook.pdf (ページNo.1)");
//! ```

pub mod assemble;
pub mod content;
pub mod log;
pub mod retriever;
pub mod session;
pub mod types;


// Re-export commonly used types
pub use assemble::{normalize_page, CitationAssembler};
pub use content::{
    Content, InquiryContent, NoMatch, SearchContent, SearchFound, SourceList, SubChoices,
};
pub use log::{ConversationLog, Turn};
pub use retriever::{Retriever, ScriptEntry, ScriptedRetriever};
pub use session::Session;
pub use types::{FileRef, Mode, PageValue, RawResult, RetrievedDocument, SourceKind};
