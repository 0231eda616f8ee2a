//! Configuration management for citelog.
//!
//! Configuration is layered from lowest to highest precedence:
//! - Built-in defaults (the captions and sentinels the answer generator uses)
//! - Config file (`.citelog/config.yaml` in the workspace, or `CITELOG_CONFIG`)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Modes the assembler understands, by their config spelling.
pub const KNOWN_MODES: [&str; 2] = ["search", "inquiry"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .citelog/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Default response mode ("search" or "inquiry")
    pub mode: String,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Captions and sentinels used when assembling citations
    pub citations: CitationConfig,
}

/// Captions and sentinel strings shared with the answer generator.
///
/// The sentinels are compared by exact equality against the generator's
/// answer text, so they must match what the generator emits verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CitationConfig {
    /// Answer the generator returns in search mode when no document matched
    pub no_doc_match_answer: String,

    /// Text shown instead of the sentinel for a search-mode miss
    pub no_doc_match_message: Option<String>,

    /// Answer the generator returns in inquiry mode when it found nothing usable
    pub inquiry_no_match_answer: String,

    /// Caption above the main document in search mode
    pub main_message: String,

    /// Caption above the remaining candidate documents in search mode
    pub sub_message: String,

    /// Caption above the source list in inquiry mode
    pub sources_label: String,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            no_doc_match_answer: "該当資料なし".to_string(),
            no_doc_match_message: None,
            inquiry_no_match_answer: "回答に必要な情報が見つかりませんでした。".to_string(),
            main_message: "入力内容に関する情報は、以下のファイルに含まれている可能性があります。"
                .to_string(),
            sub_message: "その他、ファイルありかの候補を提示します。".to_string(),
            sources_label: "情報源".to_string(),
        }
    }
}

impl CitationConfig {
    /// Text carried by a search-mode `noMatch` record.
    pub fn no_doc_match_text(&self) -> &str {
        self.no_doc_match_message
            .as_deref()
            .unwrap_or(&self.no_doc_match_answer)
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    mode: Option<String>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
    citations: Option<CitationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            mode: "search".to_string(),
            log_level: None,
            verbose: false,
            no_color: false,
            citations: CitationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `CITELOG_WORKSPACE`: Override workspace path
    /// - `CITELOG_CONFIG`: Path to config file
    /// - `CITELOG_MODE`: Default response mode
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use citelog_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration, with explicit workspace and config file paths
    /// taking precedence over their environment variables.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| env_path("CITELOG_WORKSPACE")) {
            config.workspace = workspace;
        }

        config.config_file = config_file.or_else(|| env_path("CITELOG_CONFIG"));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config.config_path();
        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(mode) = std::env::var("CITELOG_MODE") {
            config.mode = mode.to_lowercase();
        }

        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Path of the YAML config file this configuration reads.
    pub fn config_path(&self) -> PathBuf {
        match self.config_file {
            Some(ref cf) => cf.clone(),
            None => self.citelog_dir().join("config.yaml"),
        }
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self;

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(mode) = config_file.mode {
            result.mode = mode.to_lowercase();
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(citations) = config_file.citations {
            result.citations = citations;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    pub fn with_overrides(
        mut self,
        mode: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode.to_lowercase();
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .citelog directory.
    pub fn citelog_dir(&self) -> PathBuf {
        self.workspace.join(".citelog")
    }

    /// Validate the configured mode and sentinels.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_MODES.contains(&self.mode.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown mode: {}. Supported: {}",
                self.mode,
                KNOWN_MODES.join(", ")
            )));
        }

        if self.citations.no_doc_match_answer.is_empty() {
            return Err(AppError::Config(
                "citations.noDocMatchAnswer must not be empty".to_string(),
            ));
        }

        if self.citations.inquiry_no_match_answer.is_empty() {
            return Err(AppError::Config(
                "citations.inquiryNoMatchAnswer must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp: &TempDir) -> AppConfig {
        AppConfig {
            workspace: temp.path().to_path_buf(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode, "search");
        assert!(!config.verbose);
        assert!(!config.no_color);
        assert_eq!(config.citations, CitationConfig::default());
    }

    #[test]
    fn test_citelog_dir() {
        let config = AppConfig::default();
        assert!(config.citelog_dir().ends_with(".citelog"));
        assert!(config.config_path().ends_with(".citelog/config.yaml"));
    }

    #[test]
    fn test_with_overrides() {
        let overridden = AppConfig::default().with_overrides(
            Some("Inquiry".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.mode, "inquiry");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_explicit_log_level_beats_verbose() {
        let overridden =
            AppConfig::default().with_overrides(None, Some("trace".to_string()), true, false);
        assert_eq!(overridden.log_level, Some("trace".to_string()));
    }

    #[test]
    fn test_no_doc_match_text_falls_back_to_sentinel() {
        let mut citations = CitationConfig::default();
        assert_eq!(citations.no_doc_match_text(), "該当資料なし");

        citations.no_doc_match_message = Some("No related documents found.".to_string());
        assert_eq!(citations.no_doc_match_text(), "No related documents found.");
    }

    #[test]
    fn test_merge_yaml_partial_citations_keep_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            "mode: INQUIRY\ncitations:\n  sourcesLabel: Sources\n  noDocMatchAnswer: NO_DOC\nlogging:\n  level: warn\n  color: false\n",
        )
        .unwrap();

        let config = config_in(&temp).merge_yaml(&path).unwrap();

        assert_eq!(config.mode, "inquiry");
        assert_eq!(config.log_level, Some("warn".to_string()));
        assert!(config.no_color);
        assert_eq!(config.citations.sources_label, "Sources");
        assert_eq!(config.citations.no_doc_match_answer, "NO_DOC");
        assert_eq!(
            config.citations.sub_message,
            CitationConfig::default().sub_message
        );
    }

    #[test]
    fn test_merge_yaml_rejects_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "citations: [not, a, map]\n").unwrap();

        let result = config_in(&temp).merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let result = AppConfig::load_from(
            Some(temp.path().to_path_buf()),
            Some(temp.path().join("missing.yaml")),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_from_reads_workspace_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".citelog");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.yaml"),
            "citations:\n  mainMessage: Found in\n",
        )
        .unwrap();

        let config = AppConfig::load_from(Some(temp.path().to_path_buf()), None).unwrap();
        assert_eq!(config.citations.main_message, "Found in");
    }

    #[test]
    fn test_validate_unknown_mode() {
        let mut config = AppConfig::default();
        config.mode = "summarize".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_sentinel() {
        let mut config = AppConfig::default();
        config.citations.inquiry_no_match_answer = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
