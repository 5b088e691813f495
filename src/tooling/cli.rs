//! CLI Tooling
//!
//! Command-line interface over a JSON bookmark export: analyze the tree, rank folders
//! for a prospective bookmark, and show the keywords a text yields.

use crate::cache::{AnalysisCache, RankedFolder};
use crate::config::{ConfigLoader, SmartmarksConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::InMemoryBookmarkStore;
use crate::tree::{AnalysisOptions, AnalysisSnapshot};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// SmartMarks CLI - bookmark analysis and folder suggestions
#[derive(Parser)]
#[command(name = "smartmarks")]
#[command(about = "Analyze a bookmark tree and suggest folders for new bookmarks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the logging flags on top of the configured logging section
    pub fn logging_overrides(&self, mut logging: LoggingConfig) -> LoggingConfig {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if self.log_file.is_some() {
            logging.file = self.log_file.clone();
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a bookmark export and list its folders
    Analyze {
        /// JSON bookmark export (browser getTree() shape)
        #[arg(long)]
        tree: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Suggest folders for a bookmark
    Suggest {
        /// JSON bookmark export (browser getTree() shape)
        #[arg(long)]
        tree: PathBuf,
        /// Bookmark title
        #[arg(long)]
        title: String,
        /// Bookmark URL
        #[arg(long)]
        url: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the keywords extracted from text
    Keywords {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// CLI context holding the resolved configuration
pub struct CliContext {
    config: SmartmarksConfig,
    options: AnalysisOptions,
}

impl CliContext {
    /// Load configuration from `config_path`, or from the default sources when absent.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: SmartmarksConfig) -> Self {
        let options = AnalysisOptions::from(&config.analysis);
        Self { config, options }
    }

    pub fn config(&self) -> &SmartmarksConfig {
        &self.config
    }

    /// Execute a command and return its rendered output
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Analyze { tree, format } => {
                let format = parse_format(format)?;
                let snapshot = self.load_cache(tree)?.get_or_analyze().await?;
                match format {
                    OutputFormat::Text => Ok(format_analysis_text(&snapshot)),
                    OutputFormat::Json => format_analysis_json(&snapshot),
                }
            }
            Commands::Suggest {
                tree,
                title,
                url,
                format,
            } => {
                let format = parse_format(format)?;
                let ranked = self
                    .load_cache(tree)?
                    .suggest(Some(title.as_str()), url.as_deref())
                    .await?;
                info!(title = %title, suggestions = ranked.len(), "Ranked folders");
                match format {
                    OutputFormat::Text => Ok(format_suggestions_text(&ranked)),
                    OutputFormat::Json => format_suggestions_json(&ranked),
                }
            }
            Commands::Keywords { text } => {
                let joined = text.join(" ");
                let keywords = self.options.extractor.extract(Some(joined.as_str()));
                Ok(keywords.into_iter().collect::<Vec<_>>().join("\n"))
            }
        }
    }

    fn load_cache(&self, tree: &Path) -> Result<AnalysisCache, ApiError> {
        let store = InMemoryBookmarkStore::load_from_file(tree)?;
        Ok(AnalysisCache::with_options(
            Arc::new(store),
            self.options.clone(),
        ))
    }
}

fn format_analysis_text(snapshot: &AnalysisSnapshot) -> String {
    let mut output = format!(
        "Bookmarks: {}\nFolders: {}\n",
        snapshot.total_bookmarks(),
        snapshot.total_folders()
    );
    if snapshot.is_empty() {
        return output;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Bookmarks", "Keywords"]);
    for folder in snapshot.iter() {
        let keywords = folder
            .keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            folder.path.clone(),
            folder.bookmark_count.to_string(),
            keywords,
        ]);
    }
    output.push('\n');
    output.push_str(&table.to_string());
    output
}

fn format_analysis_json(snapshot: &AnalysisSnapshot) -> Result<String, ApiError> {
    let folders: Vec<_> = snapshot.iter().collect();
    let summary = snapshot.summary();
    let value = json!({
        "totalBookmarks": summary.total_bookmarks,
        "totalFolders": summary.total_folders,
        "analyzedAt": snapshot.analyzed_at().to_rfc3339(),
        "folders": folders,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_suggestions_text(ranked: &[RankedFolder]) -> String {
    if ranked.is_empty() {
        return "No folder suggestions".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Path", "Bookmarks", "Score"]);
    for (rank, folder) in ranked.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            folder.path.clone(),
            folder.bookmark_count.to_string(),
            folder.score.to_string(),
        ]);
    }
    table.to_string()
}

fn format_suggestions_json(ranked: &[RankedFolder]) -> Result<String, ApiError> {
    let suggestions: Vec<_> = ranked
        .iter()
        .map(|folder| {
            json!({
                "id": folder.id,
                "title": folder.title,
                "path": folder.path,
                "bookmarkCount": folder.bookmark_count,
                "score": folder.score,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&json!({ "suggestions": suggestions }))?)
}
