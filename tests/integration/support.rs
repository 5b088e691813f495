use async_trait::async_trait;
use parking_lot::Mutex;
use smartmarks::error::{ApiError, StoreError};
use smartmarks::messaging::{MessageChannel, Notification};
use smartmarks::store::{BookmarkNode, BookmarkStore, InMemoryBookmarkStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bar > Development {GitHub, Stack Overflow}, News {2 bookmarks}
pub fn scenario_tree() -> Vec<BookmarkNode> {
    vec![BookmarkNode::folder("1", "Bar").with_children(vec![
        BookmarkNode::folder("10", "Development").with_children(vec![
            BookmarkNode::bookmark("11", "GitHub", "https://github.com"),
            BookmarkNode::bookmark("12", "Stack Overflow", "https://stackoverflow.com"),
        ]),
        BookmarkNode::folder("20", "News").with_children(vec![
            BookmarkNode::bookmark("21", "Hacker News", "https://news.ycombinator.com"),
            BookmarkNode::bookmark("22", "Reuters World", "https://reuters.com/world"),
        ]),
    ])]
}

pub fn scenario_store() -> Arc<InMemoryBookmarkStore> {
    Arc::new(InMemoryBookmarkStore::from_tree(scenario_tree()).unwrap())
}

/// Folder chain `depth` levels deep, each level holding one bookmark
pub fn deep_tree(depth: usize) -> Vec<BookmarkNode> {
    let mut node = BookmarkNode::folder(format!("f{}", depth), format!("Level {}", depth))
        .with_children(vec![BookmarkNode::bookmark(
            format!("b{}", depth),
            format!("Page {}", depth),
            format!("https://level{}.example", depth),
        )]);
    for level in (0..depth).rev() {
        node = BookmarkNode::folder(format!("f{}", level), format!("Level {}", level))
            .with_children(vec![
                node,
                BookmarkNode::bookmark(
                    format!("b{}", level),
                    format!("Page {}", level),
                    format!("https://level{}.example", level),
                ),
            ]);
    }
    vec![node]
}

/// Store whose tree reads, or one folder's child listing, can be switched to fail
pub struct SwitchableStore {
    pub inner: Arc<InMemoryBookmarkStore>,
    failing: AtomicBool,
    unreadable_folder: Mutex<Option<String>>,
}

impl SwitchableStore {
    pub fn new(inner: Arc<InMemoryBookmarkStore>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
            unreadable_folder: Mutex::new(None),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_unreadable_folder(&self, folder_id: &str) {
        *self.unreadable_folder.lock() = Some(folder_id.to_string());
    }
}

#[async_trait]
impl BookmarkStore for SwitchableStore {
    async fn get_tree(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        self.inner.get_tree().await
    }

    async fn get_folders(&self) -> Result<Vec<BookmarkNode>, StoreError> {
        self.inner.get_folders().await
    }

    async fn get_children(&self, folder_id: &str) -> Result<Vec<BookmarkNode>, StoreError> {
        if self.unreadable_folder.lock().as_deref() == Some(folder_id) {
            return Err(StoreError::Unavailable(format!("children of {}", folder_id)));
        }
        self.inner.get_children(folder_id).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Vec<BookmarkNode>, StoreError> {
        self.inner.get_by_id(id).await
    }
}

/// Channel that records every notification it accepts
#[derive(Default)]
pub struct RecordingChannel {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl MessageChannel for RecordingChannel {
    async fn notify(&self, notification: Notification) -> Result<(), ApiError> {
        self.sent.lock().push(notification);
        Ok(())
    }
}
