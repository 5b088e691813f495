//! Bookmark tree analysis
//!
//! Walks the bookmark forest and derives per-folder metadata (bookmark counts, keyword
//! vocabularies, display paths) into an immutable [`AnalysisSnapshot`].

pub mod analyzer;
pub mod folder;
pub mod keywords;
pub mod node;

pub use analyzer::{analyze, AnalysisSnapshot, AnalysisSummary};
pub use folder::{build_folder_record, FolderRecord};
pub use keywords::{extract, KeywordExtractor, KeywordSet};
pub use node::{BookmarkEntry, NodeKind};

use crate::config::AnalysisConfig;
use crate::types::{MAX_SUGGESTIONS, PATH_SEPARATOR, UNNAMED_FOLDER};

/// Tunables shared by the analyzer and the suggestion ranker
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub extractor: KeywordExtractor,
    pub path_separator: String,
    pub unnamed_folder_title: String,
    pub max_suggestions: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            extractor: KeywordExtractor::default(),
            path_separator: PATH_SEPARATOR.to_string(),
            unnamed_folder_title: UNNAMED_FOLDER.to_string(),
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            extractor: KeywordExtractor::new(config.min_keyword_length, &config.stop_words),
            path_separator: config.path_separator.clone(),
            unnamed_folder_title: config.unnamed_folder_title.clone(),
            max_suggestions: config.max_suggestions,
        }
    }
}
