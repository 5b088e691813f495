//! Messaging
//!
//! Wire types exchanged with UI surfaces and the [`MessageChannel`] seam notifications are
//! pushed through. Requests are answered with a `{status, ...}` envelope; suggestion
//! notifications are fire-and-forget.

use crate::cache::{AnalysisCache, RankedFolder};
use crate::error::ApiError;
use crate::tree::AnalysisSummary;
use crate::types::BookmarkId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Request received from a UI surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetBookmarkAnalysis,
    SuggestFolders {
        title: String,
        #[serde(default)]
        url: Option<String>,
    },
}

/// Reply envelope for a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { data: ResponseData },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Analysis(AnalysisSummary),
    Suggestions { suggestions: Vec<FolderSuggestion> },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }
}

/// One suggested destination folder as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSuggestion {
    pub id: BookmarkId,
    pub title: String,
    pub path: String,
    pub bookmark_count: usize,
}

impl From<RankedFolder> for FolderSuggestion {
    fn from(ranked: RankedFolder) -> Self {
        Self {
            id: ranked.id,
            title: ranked.title,
            path: ranked.path,
            bookmark_count: ranked.bookmark_count,
        }
    }
}

/// Suggestions for a newly created bookmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSuggestions {
    pub bookmark_id: BookmarkId,
    pub suggestions: Vec<FolderSuggestion>,
}

/// Unsolicited message pushed to UI surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Notification {
    FolderSuggestions(FolderSuggestions),
}

/// Outbound channel to UI surfaces.
///
/// `notify` fails when nobody is listening; callers treat delivery as best effort.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError>;
}

/// In-process [`MessageChannel`] fanning notifications out to every subscriber
#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl MessageChannel for NotificationHub {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError> {
        self.sender
            .send(notification)
            .map(|_| ())
            .map_err(|_| ApiError::ChannelError("no listener is connected".to_string()))
    }
}

/// Answer a typed request against the cached analysis.
pub async fn handle_request(cache: &AnalysisCache, request: Request) -> Response {
    match request {
        Request::GetBookmarkAnalysis => match cache.get_or_analyze().await {
            Ok(snapshot) => Response::Success {
                data: ResponseData::Analysis(snapshot.summary()),
            },
            Err(e) => Response::error(e.to_string()),
        },
        Request::SuggestFolders { title, url } => {
            match cache.suggest(Some(&title), url.as_deref()).await {
                Ok(ranked) => Response::Success {
                    data: ResponseData::Suggestions {
                        suggestions: ranked.into_iter().map(FolderSuggestion::from).collect(),
                    },
                },
                Err(e) => Response::error(e.to_string()),
            }
        }
    }
}

/// Answer a raw JSON message; anything that is not a known request gets an error response.
pub async fn handle_message(cache: &AnalysisCache, message: &serde_json::Value) -> Response {
    match Request::deserialize(message) {
        Ok(request) => {
            debug!(?request, "Handling request");
            handle_request(cache, request).await
        }
        Err(e) => {
            warn!(error = %e, "Rejected unrecognized message");
            Response::error(format!("Unsupported request: {}", e))
        }
    }
}
