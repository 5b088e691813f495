//! Configuration
//!
//! Layered configuration for the analysis engine. Sources are merged with the `config`
//! crate, lowest precedence first: built-in defaults, the global config file (or an explicit
//! file in its place), then `SMARTMARKS_*` environment variables.

mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::keywords::{MIN_KEYWORD_LENGTH, STOP_WORDS};
use crate::types::{MAX_SUGGESTIONS, PATH_SEPARATOR, UNNAMED_FOLDER};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartmarksConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Keyword and folder-record settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_path_separator")]
    pub path_separator: String,

    #[serde(default = "default_unnamed_folder_title")]
    pub unnamed_folder_title: String,

    /// Maximum number of ranked folders returned per suggestion
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Shortest token kept as a keyword
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,

    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
}

fn default_path_separator() -> String {
    PATH_SEPARATOR.to_string()
}

fn default_unnamed_folder_title() -> String {
    UNNAMED_FOLDER.to_string()
}

fn default_max_suggestions() -> usize {
    MAX_SUGGESTIONS
}

fn default_min_keyword_length() -> usize {
    MIN_KEYWORD_LENGTH
}

fn default_stop_words() -> Vec<String> {
    STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            path_separator: default_path_separator(),
            unnamed_folder_title: default_unnamed_folder_title(),
            max_suggestions: default_max_suggestions(),
            min_keyword_length: default_min_keyword_length(),
            stop_words: default_stop_words(),
        }
    }
}

/// Event dispatcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Pending events beyond this are rejected
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Run a full analysis when the dispatcher starts
    #[serde(default = "default_true")]
    pub analyze_on_start: bool,
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            analyze_on_start: default_true(),
        }
    }
}
