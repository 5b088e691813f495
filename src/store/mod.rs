//! Bookmark Store
//!
//! The bookmark store is an external collaborator: it owns bookmark data and fires change
//! notifications. This module defines the loose node shape the store hands out, the
//! change-info records attached to its notifications, and the async read capability the
//! analysis engine consumes.

pub mod memory;

use crate::error::StoreError;
use crate::types::BookmarkId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryBookmarkStore;

/// Bookmark node as exported by the store.
///
/// A node with a URL is a leaf bookmark; a node without one is a folder. Root-level
/// containers carry no parent id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: BookmarkId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BookmarkId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
    /// Creation time in milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<u64>,
}

impl BookmarkNode {
    /// Create a folder node with no children
    pub fn folder(id: impl Into<BookmarkId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: None,
            parent_id: None,
            children: Some(Vec::new()),
            date_added: None,
        }
    }

    /// Create a leaf bookmark node
    pub fn bookmark(
        id: impl Into<BookmarkId>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            url: Some(url.into()),
            parent_id: None,
            children: None,
            date_added: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<BookmarkId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<BookmarkNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// True when the node is a leaf bookmark (has a URL)
    pub fn is_bookmark(&self) -> bool {
        self.url.is_some()
    }

    pub fn is_folder(&self) -> bool {
        !self.is_bookmark()
    }

    /// Title, treating an empty string the same as an absent one
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Fields touched by an edit notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Old and new position of a moved node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInfo {
    pub parent_id: BookmarkId,
    pub old_parent_id: BookmarkId,
    pub index: usize,
    pub old_index: usize,
}

/// Former position of a removed node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveInfo {
    pub parent_id: BookmarkId,
    pub index: usize,
}

/// Read capability of the bookmark store consumed by the analysis engine.
///
/// Timeouts and retries are owned by implementations; callers never retry.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Full bookmark forest, nested through `children`
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError>;

    /// Every folder node in the store
    async fn get_folders(&self) -> Result<Vec<BookmarkNode>, StoreError>;

    /// Direct children of a folder, in store order
    async fn get_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>, StoreError>;

    /// Node lookup; an unknown id yields an empty list rather than an error
    async fn get_by_id(&self, id: &str) -> Result<Vec<BookmarkNode>, StoreError>;
}
