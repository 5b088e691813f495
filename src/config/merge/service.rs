//! MergeService: orchestrates sources and deserializes to SmartmarksConfig.
//!
//! Built-in defaults come from the serde defaults of the config structs, so a key missing
//! from every source keeps its default value.

use crate::config::sources::{environment, global_file};
use crate::config::SmartmarksConfig;
use config::{Config, ConfigError, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<SmartmarksConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    /// The global file is skipped; the explicit file must exist.
    pub fn load_from_file(path: &Path) -> Result<SmartmarksConfig, ConfigError> {
        let builder = Config::builder();
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
