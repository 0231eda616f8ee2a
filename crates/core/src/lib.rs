//! Citelog Core Library
//!
//! Foundational utilities shared by the citelog crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management, including citation captions and sentinels

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, CitationConfig};
pub use error::{AppError, AppResult};
