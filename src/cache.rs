//! Analysis Cache
//!
//! Owns the current [`AnalysisSnapshot`] and the bookmark store it is computed from.
//! Readers get the held snapshot without touching the store; recomputations are serialized
//! so two rebuilds never overlap, and a snapshot is only replaced by a successful rebuild.

use crate::error::ApiError;
use crate::store::BookmarkStore;
use crate::suggest::{rank_folders, ScoredFolder};
use crate::tree::{analyze, AnalysisOptions, AnalysisSnapshot};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Holder of the latest bookmark analysis
pub struct AnalysisCache {
    store: Arc<dyn BookmarkStore>,
    options: AnalysisOptions,
    current: RwLock<Option<Arc<AnalysisSnapshot>>>,
    /// Held for the whole duration of a recomputation
    recompute: Mutex<()>,
}

impl AnalysisCache {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self::with_options(store, AnalysisOptions::default())
    }

    pub fn with_options(store: Arc<dyn BookmarkStore>, options: AnalysisOptions) -> Self {
        Self {
            store,
            options,
            current: RwLock::new(None),
            recompute: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStore> {
        &self.store
    }

    /// The held snapshot, if any analysis has succeeded yet
    pub fn current(&self) -> Option<Arc<AnalysisSnapshot>> {
        self.current.read().clone()
    }

    /// Return the held snapshot, analyzing the store first if there is none.
    pub async fn get_or_analyze(&self) -> Result<Arc<AnalysisSnapshot>, ApiError> {
        if let Some(snapshot) = self.current() {
            return Ok(snapshot);
        }

        let _guard = self.recompute.lock().await;
        // Another caller may have finished an analysis while we waited
        if let Some(snapshot) = self.current() {
            debug!("Using snapshot computed while waiting");
            return Ok(snapshot);
        }
        self.recompute_locked().await
    }

    /// Re-analyze the store unconditionally.
    ///
    /// On failure the previously held snapshot stays current and the error is returned.
    pub async fn force_analyze(&self) -> Result<Arc<AnalysisSnapshot>, ApiError> {
        let _guard = self.recompute.lock().await;
        self.recompute_locked().await
    }

    async fn recompute_locked(&self) -> Result<Arc<AnalysisSnapshot>, ApiError> {
        match analyze(self.store.as_ref(), &self.options).await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.current.write() = Some(Arc::clone(&snapshot));
                info!(
                    total_bookmarks = snapshot.total_bookmarks(),
                    total_folders = snapshot.total_folders(),
                    "Installed new bookmark analysis"
                );
                Ok(snapshot)
            }
            Err(e) => {
                error!(
                    error = %e,
                    kept_previous = self.current.read().is_some(),
                    "Error analyzing bookmarks"
                );
                Err(e)
            }
        }
    }

    /// Rank folders for a bookmark against the held snapshot (analyzing if none is held).
    pub async fn suggest(
        &self,
        title: Option<&str>,
        url: Option<&str>,
    ) -> Result<Vec<RankedFolder>, ApiError> {
        let snapshot = self.get_or_analyze().await?;
        Ok(rank_folders(title, url, &snapshot, &self.options)
            .into_iter()
            .map(RankedFolder::from)
            .collect())
    }
}

/// Owned copy of a ranked folder, detached from the snapshot it was ranked in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedFolder {
    pub id: String,
    pub title: String,
    pub path: String,
    pub bookmark_count: usize,
    pub score: usize,
}

impl From<ScoredFolder<'_>> for RankedFolder {
    fn from(scored: ScoredFolder<'_>) -> Self {
        Self {
            id: scored.folder.id.clone(),
            title: scored.folder.title.clone(),
            path: scored.folder.path.clone(),
            bookmark_count: scored.folder.bookmark_count,
            score: scored.score,
        }
    }
}
