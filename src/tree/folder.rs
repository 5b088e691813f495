//! Folder records: per-folder bookmark counts and keyword vocabularies.

use super::keywords::KeywordSet;
use super::node::BookmarkEntry;
use super::AnalysisOptions;
use crate::store::{BookmarkNode, BookmarkStore};
use crate::types::BookmarkId;
use serde::Serialize;
use tracing::{debug, error};

/// Derived metadata for one bookmark-store folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: BookmarkId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BookmarkId>,
    /// Ancestor titles joined by the path separator; the own title until resolved
    pub path: String,
    /// Immediate children as seen at analysis time
    #[serde(skip)]
    pub direct_children: Vec<BookmarkEntry>,
    /// Direct leaf bookmarks only; bookmarks in sub-folders are not counted
    pub bookmark_count: usize,
    pub keywords: KeywordSet,
}

impl FolderRecord {
    /// Build a record from a folder node and its already-fetched direct children
    pub fn from_children(
        folder: &BookmarkNode,
        children: Vec<BookmarkNode>,
        options: &AnalysisOptions,
    ) -> Self {
        let title = folder
            .display_title()
            .unwrap_or(&options.unnamed_folder_title)
            .to_string();

        let direct_children: Vec<BookmarkEntry> =
            children.into_iter().map(BookmarkEntry::from).collect();

        let mut bookmark_count = 0;
        let mut keywords = KeywordSet::new();
        for child in direct_children.iter().filter(|c| c.is_bookmark()) {
            bookmark_count += 1;
            options
                .extractor
                .extract_into(child.title.as_deref(), &mut keywords);
            options.extractor.extract_into(child.url(), &mut keywords);
        }

        Self {
            id: folder.id.clone(),
            path: title.clone(),
            title,
            parent_id: folder.parent_id.clone(),
            direct_children,
            bookmark_count,
            keywords,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Build the record for `folder`, fetching its direct children from the store.
///
/// A failed fetch is logged and treated as an empty folder so one unreadable folder
/// cannot abort a whole analysis.
pub async fn build_folder_record(
    store: &dyn BookmarkStore,
    folder: &BookmarkNode,
    options: &AnalysisOptions,
) -> FolderRecord {
    let children = match store.get_children(&folder.id).await {
        Ok(children) => children,
        Err(e) => {
            error!(folder_id = %folder.id, error = %e, "Error processing folder");
            Vec::new()
        }
    };

    let record = FolderRecord::from_children(folder, children, options);
    debug!(
        folder_id = %record.id,
        bookmark_count = record.bookmark_count,
        keyword_count = record.keywords.len(),
        "Built folder record"
    );
    record
}
