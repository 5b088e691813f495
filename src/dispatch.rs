//! Event Dispatcher
//!
//! Drains bookmark-store events on a single background task, strictly in arrival order.
//! Recomputations triggered by events therefore run back to back and never overlap.
//! New leaf bookmarks are ranked against the current snapshot and the result is pushed
//! through the [`MessageChannel`].

use crate::cache::AnalysisCache;
use crate::config::DispatchConfig;
use crate::error::ApiError;
use crate::events::{BookmarkEvent, EventResponse};
use crate::messaging::{FolderSuggestion, FolderSuggestions, MessageChannel, Notification};
use crate::store::BookmarkNode;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Dispatcher counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Events taken off the queue
    pub processed: usize,
    /// Successful snapshot rebuilds, including the startup analysis
    pub recomputations: usize,
    pub failed_recomputations: usize,
    /// Suggestion notifications accepted by the channel
    pub suggestions_sent: usize,
}

enum Command {
    Event(BookmarkEvent),
    Flush(oneshot::Sender<()>),
}

/// Handle to the running event worker
pub struct EventDispatcher {
    sender: mpsc::Sender<Command>,
    worker: JoinHandle<()>,
    stats: Arc<RwLock<DispatchStats>>,
}

impl EventDispatcher {
    /// Spawn the worker on the current tokio runtime.
    pub fn start(
        cache: Arc<AnalysisCache>,
        channel: Arc<dyn MessageChannel>,
        config: &DispatchConfig,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let stats = Arc::new(RwLock::new(DispatchStats::default()));

        let worker = tokio::spawn(worker_loop(
            receiver,
            cache,
            channel,
            Arc::clone(&stats),
            config.analyze_on_start,
        ));

        info!(
            queue_capacity = config.queue_capacity,
            analyze_on_start = config.analyze_on_start,
            "Started bookmark event dispatcher"
        );

        Self {
            sender,
            worker,
            stats,
        }
    }

    /// Queue an event without waiting. Fails when the queue is full or the worker is gone.
    pub fn dispatch(&self, event: BookmarkEvent) -> Result<(), ApiError> {
        self.sender
            .try_send(Command::Event(event))
            .map_err(|e| match e {
                TrySendError::Full(_) => {
                    ApiError::ChannelError("bookmark event queue is full".to_string())
                }
                TrySendError::Closed(_) => ApiError::DispatcherStopped,
            })
    }

    /// Wait until every event queued before this call has been handled.
    pub async fn flush(&self) -> Result<(), ApiError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(Command::Flush(tx))
            .await
            .map_err(|_| ApiError::DispatcherStopped)?;
        rx.await.map_err(|_| ApiError::DispatcherStopped)
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats.read().clone()
    }

    /// Stop accepting events, let the worker drain the queue, and wait for it.
    pub async fn shutdown(self) -> Result<(), ApiError> {
        drop(self.sender);
        self.worker
            .await
            .map_err(|e| ApiError::ChannelError(format!("Dispatcher worker failed: {}", e)))?;
        info!("Stopped bookmark event dispatcher");
        Ok(())
    }
}

async fn worker_loop(
    mut receiver: mpsc::Receiver<Command>,
    cache: Arc<AnalysisCache>,
    channel: Arc<dyn MessageChannel>,
    stats: Arc<RwLock<DispatchStats>>,
    analyze_on_start: bool,
) {
    debug!("Dispatcher worker started");

    if analyze_on_start {
        recompute(&cache, &stats, "startup").await;
    }

    while let Some(command) = receiver.recv().await {
        match command {
            Command::Event(event) => {
                handle_event(&cache, channel.as_ref(), &stats, event).await;
                stats.write().processed += 1;
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    debug!("Dispatcher worker stopped");
}

async fn handle_event(
    cache: &AnalysisCache,
    channel: &dyn MessageChannel,
    stats: &RwLock<DispatchStats>,
    event: BookmarkEvent,
) {
    let response = event.response();
    debug!(id = %event.id(), kind = event.kind(), ?response, "Handling bookmark event");

    match (response, event) {
        (EventResponse::Suggest, BookmarkEvent::Created { id, node }) => {
            if suggest_for_created(cache, channel, &id, node).await {
                stats.write().suggestions_sent += 1;
            }
        }
        (EventResponse::Recompute, event) => {
            recompute(cache, stats, event.kind()).await;
        }
        (_, event) => {
            debug!(id = %event.id(), kind = event.kind(), "No analysis change needed");
        }
    }
}

async fn recompute(cache: &AnalysisCache, stats: &RwLock<DispatchStats>, reason: &str) {
    match cache.force_analyze().await {
        Ok(snapshot) => {
            stats.write().recomputations += 1;
            debug!(reason, total_folders = snapshot.total_folders(), "Analysis recomputed");
        }
        Err(e) => {
            stats.write().failed_recomputations += 1;
            warn!(reason, error = %e, "Analysis recompute failed; keeping previous snapshot");
        }
    }
}

/// Rank folders for a newly created node and notify. Returns whether a notification went out.
async fn suggest_for_created(
    cache: &AnalysisCache,
    channel: &dyn MessageChannel,
    id: &str,
    fallback: BookmarkNode,
) -> bool {
    let node = match cache.store().get_by_id(id).await {
        Ok(mut found) if !found.is_empty() => found.swap_remove(0),
        Ok(_) => fallback,
        Err(e) => {
            warn!(id = %id, error = %e, "Could not fetch created bookmark; using event payload");
            fallback
        }
    };
    if !node.is_bookmark() {
        return false;
    }

    let ranked = match cache.suggest(node.title.as_deref(), node.url.as_deref()).await {
        Ok(ranked) => ranked,
        Err(e) => {
            error!(id = %id, error = %e, "Error suggesting folders");
            return false;
        }
    };
    if ranked.is_empty() {
        debug!(id = %id, "No folder suggestions for new bookmark");
        return false;
    }

    let notification = Notification::FolderSuggestions(FolderSuggestions {
        bookmark_id: id.to_string(),
        suggestions: ranked.into_iter().map(FolderSuggestion::from).collect(),
    });
    match channel.notify(notification).await {
        Ok(()) => true,
        Err(e) => {
            debug!(id = %id, error = %e, "Folder suggestions not delivered");
            false
        }
    }
}
