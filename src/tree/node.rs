//! Tagged bookmark entries.
//!
//! Store nodes tell folders and bookmarks apart only by the presence of a URL. Entries are
//! classified once, on ingestion, so the analysis never branches on field presence.

use crate::store::BookmarkNode;
use crate::types::BookmarkId;

/// Role of a bookmark entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder { children: Vec<BookmarkEntry> },
    Bookmark { url: String },
}

/// Classified bookmark-store node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEntry {
    pub id: BookmarkId,
    pub title: Option<String>,
    pub parent_id: Option<BookmarkId>,
    pub date_added: Option<u64>,
    pub kind: NodeKind,
}

impl BookmarkEntry {
    pub fn is_bookmark(&self) -> bool {
        matches!(self.kind, NodeKind::Bookmark { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Bookmark { url } => Some(url),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Nested children; empty for bookmarks and for folders fetched without their subtree
    pub fn children(&self) -> &[BookmarkEntry] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Bookmark { .. } => &[],
        }
    }
}

impl From<BookmarkNode> for BookmarkEntry {
    fn from(node: BookmarkNode) -> Self {
        let kind = match node.url {
            Some(url) => NodeKind::Bookmark { url },
            None => NodeKind::Folder {
                children: node
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(BookmarkEntry::from)
                    .collect(),
            },
        };
        Self {
            id: node.id,
            title: node.title,
            parent_id: node.parent_id,
            date_added: node.date_added,
            kind,
        }
    }
}
