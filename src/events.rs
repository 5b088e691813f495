//! Bookmark change events and the recompute policy applied to them.

use crate::store::{BookmarkNode, ChangeInfo, MoveInfo, RemoveInfo};
use crate::types::BookmarkId;
use serde::{Deserialize, Serialize};

/// Store mutation notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BookmarkEvent {
    Created { id: BookmarkId, node: BookmarkNode },
    Changed { id: BookmarkId, info: ChangeInfo },
    Moved { id: BookmarkId, info: MoveInfo },
    Removed { id: BookmarkId, info: RemoveInfo },
}

/// What the engine does in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Rank folders for the new bookmark against the current snapshot
    Suggest,
    /// Rebuild the analysis snapshot
    Recompute,
    /// Log only
    Ignore,
}

impl BookmarkEvent {
    /// Id of the node the event refers to
    pub fn id(&self) -> &str {
        match self {
            BookmarkEvent::Created { id, .. }
            | BookmarkEvent::Changed { id, .. }
            | BookmarkEvent::Moved { id, .. }
            | BookmarkEvent::Removed { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BookmarkEvent::Created { .. } => "created",
            BookmarkEvent::Changed { .. } => "changed",
            BookmarkEvent::Moved { .. } => "moved",
            BookmarkEvent::Removed { .. } => "removed",
        }
    }

    /// Map the event onto the engine's response.
    ///
    /// New leaf bookmarks get suggestions without a rebuild; new folders, title edits,
    /// moves and removals change folder membership or vocabulary and force a rebuild.
    /// URL-only edits are ignored.
    pub fn response(&self) -> EventResponse {
        match self {
            BookmarkEvent::Created { node, .. } => {
                if node.is_bookmark() {
                    EventResponse::Suggest
                } else {
                    EventResponse::Recompute
                }
            }
            BookmarkEvent::Changed { info, .. } => {
                if info.title.is_some() {
                    EventResponse::Recompute
                } else {
                    EventResponse::Ignore
                }
            }
            BookmarkEvent::Moved { .. } | BookmarkEvent::Removed { .. } => {
                EventResponse::Recompute
            }
        }
    }
}
