//! In-memory bookmark store.
//!
//! Holds a bookmark forest behind a lock and implements both the read capability and the
//! mutation operations a browser store exposes. Every mutation returns the change event the
//! host would fire so callers can feed it to the event dispatcher.

use super::{BookmarkNode, BookmarkStore, ChangeInfo, MoveInfo, RemoveInfo};
use crate::error::StoreError;
use crate::events::BookmarkEvent;
use crate::types::BookmarkId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Entry {
    /// Node data; `children` is always `None` here
    node: BookmarkNode,
    children: Vec<BookmarkId>,
}

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<BookmarkId, Entry>,
    roots: Vec<BookmarkId>,
    next_id: u64,
}

impl StoreState {
    fn entry(&self, id: &str) -> Result<&Entry, StoreError> {
        self.entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut Entry, StoreError> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn allocate_id(&mut self) -> BookmarkId {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id = self.next_id.wrapping_add(1);
            if !self.entries.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Insert a nested subtree. Nested nodes take their parent from nesting; the top
    /// node keeps an imported `parentId` when `parent` is `None`.
    fn insert_subtree(
        &mut self,
        node: BookmarkNode,
        parent: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut pending = vec![(node, parent.map(str::to_string))];
        while let Some((mut node, parent)) = pending.pop() {
            if self.entries.contains_key(&node.id) {
                return Err(StoreError::InvalidOperation(format!(
                    "Duplicate bookmark id: {}",
                    node.id
                )));
            }
            let children = node.children.take().unwrap_or_default();
            if node.is_bookmark() && !children.is_empty() {
                return Err(StoreError::InvalidOperation(format!(
                    "Bookmark {} has both a URL and children",
                    node.id
                )));
            }
            let is_root = parent.is_none();
            if parent.is_some() {
                node.parent_id = parent;
            }
            if let Ok(numeric) = node.id.parse::<u64>() {
                self.next_id = self.next_id.max(numeric.saturating_add(1));
            }

            let id = node.id.clone();
            let child_ids = children.iter().map(|c| c.id.clone()).collect();
            self.entries.insert(
                id.clone(),
                Entry {
                    node,
                    children: child_ids,
                },
            );
            if is_root {
                self.roots.push(id.clone());
            }
            pending.extend(children.into_iter().rev().map(|c| (c, Some(id.clone()))));
        }
        Ok(())
    }

    /// Rebuild the nested form of a subtree, children before their folder.
    fn build_subtree(&self, id: &str) -> Result<BookmarkNode, StoreError> {
        let mut pending: Vec<(&str, bool)> = vec![(id, false)];
        let mut built: Vec<BookmarkNode> = Vec::new();
        while let Some((id, expanded)) = pending.pop() {
            let entry = self.entry(id)?;
            if entry.node.is_bookmark() {
                built.push(entry.node.clone());
            } else if !expanded {
                pending.push((id, true));
                pending.extend(entry.children.iter().rev().map(|c| (c.as_str(), false)));
            } else {
                let first_child = built.len().saturating_sub(entry.children.len());
                let mut node = entry.node.clone();
                node.children = Some(built.split_off(first_child));
                built.push(node);
            }
        }
        built
            .pop()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn parent_of(&self, id: &str) -> Result<BookmarkId, StoreError> {
        self.entry(id)?.node.parent_id.clone().ok_or_else(|| {
            StoreError::InvalidOperation(format!("Root node {} cannot be modified", id))
        })
    }

    fn is_descendant(&self, candidate: &str, ancestor: &str) -> bool {
        let mut current = Some(candidate.to_string());
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self
                .entries
                .get(&id)
                .and_then(|e| e.node.parent_id.clone());
        }
        false
    }

    fn require_folder(&self, id: &str) -> Result<&Entry, StoreError> {
        let entry = self.entry(id)?;
        if entry.node.is_bookmark() {
            return Err(StoreError::InvalidOperation(format!(
                "{} is a bookmark, not a folder",
                id
            )));
        }
        Ok(entry)
    }

    /// Detach a node from its parent's child list, returning (parent id, old index)
    fn detach(&mut self, id: &str) -> Result<(BookmarkId, usize), StoreError> {
        let parent_id = self.parent_of(id)?;
        let parent = self.entry_mut(&parent_id)?;
        let index = parent
            .children
            .iter()
            .position(|child| child == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        parent.children.remove(index);
        Ok((parent_id, index))
    }

    fn remove_subtree(&mut self, id: &str) -> Result<BookmarkEvent, StoreError> {
        let (parent_id, index) = self.detach(id)?;
        self.drop_subtree(id);
        debug!(id = %id, parent_id = %parent_id, "Removed bookmark node");
        Ok(BookmarkEvent::Removed {
            id: id.to_string(),
            info: RemoveInfo { parent_id, index },
        })
    }

    fn drop_subtree(&mut self, id: &str) {
        let mut pending = vec![id.to_string()];
        while let Some(id) = pending.pop() {
            if let Some(entry) = self.entries.remove(&id) {
                pending.extend(entry.children);
            }
        }
    }
}

/// Bookmark store kept entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    state: RwLock<StoreState>,
}

impl InMemoryBookmarkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a nested forest; nested parent ids are derived from nesting.
    pub fn from_tree(forest: Vec<BookmarkNode>) -> Result<Self, StoreError> {
        let mut state = StoreState::default();
        for root in forest {
            state.insert_subtree(root, None)?;
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Load a store from a JSON export of the bookmark forest
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let forest: Vec<BookmarkNode> = serde_json::from_str(&raw)?;
        let store = Self::from_tree(forest)?;
        info!(path = %path.display(), nodes = store.len(), "Loaded bookmark export");
        Ok(store)
    }

    /// Number of nodes (folders and bookmarks) in the store
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Create a bookmark (with `url`) or a folder (without) under `parent_id`.
    pub fn create(
        &self,
        parent_id: &str,
        title: &str,
        url: Option<&str>,
    ) -> Result<(BookmarkNode, BookmarkEvent), StoreError> {
        let mut state = self.state.write();
        state.require_folder(parent_id)?;

        let id = state.allocate_id();
        let node = BookmarkNode {
            id: id.clone(),
            title: Some(title.to_string()),
            url: url.map(str::to_string),
            parent_id: Some(parent_id.to_string()),
            children: None,
            date_added: u64::try_from(chrono::Utc::now().timestamp_millis()).ok(),
        };
        state.entries.insert(
            id.clone(),
            Entry {
                node: node.clone(),
                children: Vec::new(),
            },
        );
        state.entry_mut(parent_id)?.children.push(id.clone());

        debug!(id = %id, parent_id = %parent_id, title = %title, "Created bookmark node");
        let event = BookmarkEvent::Created {
            id,
            node: node.clone(),
        };
        Ok((node, event))
    }

    /// Apply a title and/or URL edit. Folders cannot take a URL.
    pub fn update(
        &self,
        id: &str,
        changes: ChangeInfo,
    ) -> Result<(BookmarkNode, BookmarkEvent), StoreError> {
        let mut state = self.state.write();
        let entry = state.entry_mut(id)?;
        if changes.url.is_some() && entry.node.is_folder() {
            return Err(StoreError::InvalidOperation(format!(
                "Cannot set a URL on folder {}",
                id
            )));
        }
        if let Some(title) = &changes.title {
            entry.node.title = Some(title.clone());
        }
        if let Some(url) = &changes.url {
            entry.node.url = Some(url.clone());
        }
        let node = entry.node.clone();

        debug!(id = %id, changes = ?changes, "Updated bookmark node");
        let event = BookmarkEvent::Changed {
            id: id.to_string(),
            info: changes,
        };
        Ok((node, event))
    }

    /// Move a node to `parent_id` (default: its current parent) at `index` (default: end).
    pub fn move_node(
        &self,
        id: &str,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<(BookmarkNode, BookmarkEvent), StoreError> {
        let mut state = self.state.write();
        let old_parent_id = state.parent_of(id)?;
        let new_parent_id = parent_id.unwrap_or(&old_parent_id).to_string();
        state.require_folder(&new_parent_id)?;
        if state.is_descendant(&new_parent_id, id) {
            return Err(StoreError::InvalidOperation(format!(
                "Cannot move {} into its own subtree",
                id
            )));
        }

        let (_, old_index) = state.detach(id)?;
        let siblings = &mut state.entry_mut(&new_parent_id)?.children;
        let new_index = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(new_index, id.to_string());

        let entry = state.entry_mut(id)?;
        entry.node.parent_id = Some(new_parent_id.clone());
        let node = entry.node.clone();

        debug!(id = %id, from = %old_parent_id, to = %new_parent_id, "Moved bookmark node");
        let event = BookmarkEvent::Moved {
            id: id.to_string(),
            info: MoveInfo {
                parent_id: new_parent_id,
                old_parent_id,
                index: new_index,
                old_index,
            },
        };
        Ok((node, event))
    }

    /// Remove a bookmark or an empty folder
    pub fn remove(&self, id: &str) -> Result<BookmarkEvent, StoreError> {
        let mut state = self.state.write();
        if !state.entry(id)?.children.is_empty() {
            return Err(StoreError::InvalidOperation(format!(
                "Folder {} is not empty; remove the tree instead",
                id
            )));
        }
        state.remove_subtree(id)
    }

    /// Remove a node together with everything beneath it
    pub fn remove_tree(&self, id: &str) -> Result<BookmarkEvent, StoreError> {
        self.state.write().remove_subtree(id)
    }

    /// Leaf bookmarks whose title or URL contains `query`, case-insensitively, in tree order
    pub fn search(&self, query: &str) -> Vec<BookmarkNode> {
        let needle = query.to_lowercase();
        let state = self.state.read();
        let mut results = Vec::new();
        let mut stack: Vec<&BookmarkId> = state.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(entry) = state.entries.get(id) else {
                continue;
            };
            if entry.node.is_bookmark() {
                let hit = [&entry.node.title, &entry.node.url]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle));
                if hit {
                    results.push(entry.node.clone());
                }
            }
            stack.extend(entry.children.iter().rev());
        }
        results
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        let state = self.state.read();
        state
            .roots
            .iter()
            .map(|root| state.build_subtree(root))
            .collect()
    }

    async fn get_folders(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        let state = self.state.read();
        let mut folders = Vec::new();
        let mut stack: Vec<&BookmarkId> = state.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            let entry = state.entry(id)?;
            if entry.node.is_folder() {
                folders.push(entry.node.clone());
            }
            stack.extend(entry.children.iter().rev());
        }
        Ok(folders)
    }

    async fn get_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>, StoreError> {
        let state = self.state.read();
        let entry = state.entry(folder_id)?;
        entry
            .children
            .iter()
            .map(|child| state.entry(child).map(|e| e.node.clone()))
            .collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Vec<BookmarkNode>, StoreError> {
        let state = self.state.read();
        Ok(state
            .entries
            .get(id)
            .map(|e| vec![e.node.clone()])
            .unwrap_or_default())
    }
}
