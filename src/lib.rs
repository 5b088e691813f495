//! SmartMarks: Bookmark Analysis and Folder Suggestions
//!
//! Analyzes a bookmark tree into per-folder keyword vocabularies and ranks existing
//! folders as destinations for newly created bookmarks. Store changes are consumed as
//! events and drive recomputation of the cached analysis.

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod store;
pub mod suggest;
pub mod tooling;
pub mod tree;
pub mod types;

pub use cache::AnalysisCache;
pub use dispatch::EventDispatcher;
pub use error::{ApiError, StoreError};
pub use events::BookmarkEvent;
pub use store::{BookmarkNode, BookmarkStore, InMemoryBookmarkStore};
pub use suggest::suggest_folders;
pub use tree::{analyze, AnalysisSnapshot, FolderRecord};
