//! Core types for the SmartMarks bookmark analysis engine.

/// BookmarkId: Store-assigned identifier, unique within one bookmark store
pub type BookmarkId = String;

/// Separator used when joining ancestor titles into a folder path
pub const PATH_SEPARATOR: &str = "/";

/// Display name for folders whose node carries no title
pub const UNNAMED_FOLDER: &str = "Unnamed Folder";

/// Upper bound on the number of ranked suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;
