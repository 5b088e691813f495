//! Tree Analyzer
//!
//! Builds an [`AnalysisSnapshot`] from the bookmark store: one [`FolderRecord`] per folder,
//! aggregate totals, the parentless root folders, and fully resolved display paths.
//!
//! Records are collected first with their own title as path. Paths are then resolved
//! top-down from the parentless records, so a folder's path is only computed once its
//! parent's path is final, however deep the tree and whatever order the store listed
//! folders in.

use super::folder::{build_folder_record, FolderRecord};
use super::AnalysisOptions;
use crate::error::ApiError;
use crate::store::{BookmarkNode, BookmarkStore};
use crate::types::{BookmarkId, PATH_SEPARATOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::{error, info, warn};

/// Aggregate counts of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_bookmarks: usize,
    pub total_folders: usize,
}

/// One complete, immutable analysis of the bookmark tree
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    folders: HashMap<BookmarkId, FolderRecord>,
    /// Insertion order of `folders`
    order: Vec<BookmarkId>,
    root_ids: Vec<BookmarkId>,
    total_bookmarks: usize,
    analyzed_at: DateTime<Utc>,
}

impl AnalysisSnapshot {
    /// Assemble a snapshot from records; parentless records become the root folders.
    ///
    /// Records with a duplicate id are ignored after the first.
    pub fn from_records(records: Vec<FolderRecord>) -> Self {
        let root_ids = records
            .iter()
            .filter(|r| r.is_root())
            .map(|r| r.id.clone())
            .collect();
        Self::assemble(records, root_ids, PATH_SEPARATOR)
    }

    fn assemble(records: Vec<FolderRecord>, root_ids: Vec<BookmarkId>, separator: &str) -> Self {
        let mut folders = HashMap::with_capacity(records.len());
        let mut order = Vec::with_capacity(records.len());
        let mut total_bookmarks = 0;
        for record in records {
            if folders.contains_key(&record.id) {
                continue;
            }
            total_bookmarks += record.bookmark_count;
            order.push(record.id.clone());
            folders.insert(record.id.clone(), record);
        }

        let mut snapshot = Self {
            folders,
            order,
            root_ids,
            total_bookmarks,
            analyzed_at: Utc::now(),
        };
        snapshot.resolve_paths(separator);
        snapshot
    }

    /// Resolve every folder's path from its ancestor chain, parents before children.
    fn resolve_paths(&mut self, separator: &str) {
        let mut children_of: HashMap<&str, Vec<BookmarkId>> = HashMap::new();
        let mut queue: VecDeque<BookmarkId> = VecDeque::new();

        for id in &self.order {
            let record = &self.folders[id];
            match record.parent_id.as_deref() {
                Some(parent) if self.folders.contains_key(parent) => {
                    children_of.entry(parent).or_default().push(id.clone());
                }
                // Roots and folders whose parent was not analyzed keep their own title
                _ => queue.push_back(id.clone()),
            }
        }

        let mut resolved = 0;
        let mut paths: HashMap<BookmarkId, String> = HashMap::new();
        while let Some(id) = queue.pop_front() {
            resolved += 1;
            let parent_path = paths
                .get(&id)
                .cloned()
                .unwrap_or_else(|| self.folders[&id].path.clone());
            for child in children_of.get(id.as_str()).into_iter().flatten() {
                let path = format!("{}{}{}", parent_path, separator, self.folders[child].title);
                paths.insert(child.clone(), path);
                queue.push_back(child.clone());
            }
        }

        if resolved < self.order.len() {
            warn!(
                unresolved = self.order.len() - resolved,
                "Folder parent chain forms a cycle; keeping titles as paths"
            );
        }

        for (id, path) in paths {
            if let Some(record) = self.folders.get_mut(&id) {
                record.path = path;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&FolderRecord> {
        self.folders.get(id)
    }

    /// Folder records in insertion order (root folders first, then store folder order)
    pub fn iter(&self) -> impl Iterator<Item = &FolderRecord> + '_ {
        self.order.iter().filter_map(|id| self.folders.get(id))
    }

    /// Records of the parentless top-level containers
    pub fn root_folders(&self) -> Vec<&FolderRecord> {
        self.root_ids
            .iter()
            .filter_map(|id| self.folders.get(id))
            .collect()
    }

    /// Sum of direct bookmark counts over all folders
    pub fn total_bookmarks(&self) -> usize {
        self.total_bookmarks
    }

    pub fn total_folders(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_bookmarks: self.total_bookmarks(),
            total_folders: self.total_folders(),
        }
    }
}

/// Analyze the whole bookmark store.
///
/// Failing to read the tree or the folder list fails the analysis; failing to read one
/// folder's children only empties that folder.
pub async fn analyze(
    store: &dyn BookmarkStore,
    options: &AnalysisOptions,
) -> Result<AnalysisSnapshot, ApiError> {
    info!("Starting bookmark analysis");

    let tree = store.get_tree().await.map_err(|e| {
        error!(error = %e, "Error retrieving bookmark tree");
        ApiError::AnalysisFailed(format!("could not read bookmark tree: {}", e))
    })?;
    let folders = store.get_folders().await.map_err(|e| {
        error!(error = %e, "Error retrieving bookmark folders");
        ApiError::AnalysisFailed(format!("could not read bookmark folders: {}", e))
    })?;
    info!(folder_count = folders.len(), "Retrieved bookmark folders");

    let snapshot = analyze_nodes(store, &tree, &folders, options).await;
    info!(
        total_bookmarks = snapshot.total_bookmarks(),
        total_folders = snapshot.total_folders(),
        "Bookmark analysis complete"
    );
    Ok(snapshot)
}

/// Build a snapshot from an already-fetched forest and folder list.
pub async fn analyze_nodes(
    store: &dyn BookmarkStore,
    tree_roots: &[BookmarkNode],
    all_folders: &[BookmarkNode],
    options: &AnalysisOptions,
) -> AnalysisSnapshot {
    let mut records = Vec::new();
    let mut root_ids = Vec::new();
    let mut seen = std::collections::HashSet::new();

    // Permanent top-level containers
    for root in tree_roots
        .iter()
        .filter(|n| n.parent_id.is_none() && n.is_folder())
    {
        if !seen.insert(root.id.clone()) {
            continue;
        }
        records.push(build_folder_record(store, root, options).await);
        root_ids.push(root.id.clone());
    }

    for folder in all_folders.iter().filter(|n| n.is_folder()) {
        if !seen.insert(folder.id.clone()) {
            continue;
        }
        records.push(build_folder_record(store, folder, options).await);
    }

    AnalysisSnapshot::assemble(records, root_ids, &options.path_separator)
}
