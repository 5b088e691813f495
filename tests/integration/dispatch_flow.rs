use smartmarks::cache::AnalysisCache;
use smartmarks::config::DispatchConfig;
use smartmarks::dispatch::EventDispatcher;
use smartmarks::events::BookmarkEvent;
use smartmarks::messaging::Notification;
use smartmarks::store::{BookmarkNode, ChangeInfo};
use std::sync::Arc;

use crate::integration::support::{scenario_store, RecordingChannel};

#[tokio::test]
async fn new_bookmark_gets_folder_suggestions() {
    let store = scenario_store();
    let cache = Arc::new(AnalysisCache::new(store.clone()));
    let channel = Arc::new(RecordingChannel::default());
    let dispatcher = EventDispatcher::start(cache, channel.clone(), &DispatchConfig::default());
    dispatcher.flush().await.unwrap();

    let (_, event) = store
        .create("1", "Stack Exchange", Some("https://stackexchange.com"))
        .unwrap();
    let new_id = event.id().to_string();
    dispatcher.dispatch(event).unwrap();
    dispatcher.flush().await.unwrap();

    let sent = channel.sent.lock().clone();
    assert_eq!(sent.len(), 1);
    let Notification::FolderSuggestions(payload) = &sent[0];
    assert_eq!(payload.bookmark_id, new_id);
    assert_eq!(payload.suggestions[0].id, "10");
    assert_eq!(payload.suggestions[0].path, "Bar/Development");
    assert_eq!(payload.suggestions[0].bookmark_count, 2);

    dispatcher.shutdown().await.unwrap();
}

#[tokio::test]
async fn unmatched_bookmark_sends_nothing() {
    let store = scenario_store();
    let cache = Arc::new(AnalysisCache::new(store.clone()));
    let channel = Arc::new(RecordingChannel::default());
    let dispatcher = EventDispatcher::start(cache, channel.clone(), &DispatchConfig::default());
    dispatcher.flush().await.unwrap();

    let (_, event) = store
        .create("1", "Gardening", Some("https://plants.example"))
        .unwrap();
    dispatcher.dispatch(event).unwrap();
    dispatcher.flush().await.unwrap();

    assert!(channel.sent.lock().is_empty());
    assert_eq!(dispatcher.stats().processed, 1);
    dispatcher.shutdown().await.unwrap();
}

#[tokio::test]
async fn created_event_falls_back_to_payload() {
    let store = scenario_store();
    let cache = Arc::new(AnalysisCache::new(store));
    let channel = Arc::new(RecordingChannel::default());
    let dispatcher = EventDispatcher::start(cache, channel.clone(), &DispatchConfig::default());

    // Not in the store: the lookup comes back empty
    let event = BookmarkEvent::Created {
        id: "900".to_string(),
        node: BookmarkNode::bookmark("900", "GitHub Issues", "https://github.com/issues"),
    };
    dispatcher.dispatch(event).unwrap();
    dispatcher.flush().await.unwrap();

    let sent = channel.sent.lock().clone();
    assert_eq!(sent.len(), 1);
    let Notification::FolderSuggestions(payload) = &sent[0];
    assert_eq!(payload.bookmark_id, "900");
    dispatcher.shutdown().await.unwrap();
}

#[tokio::test]
async fn events_recompute_in_arrival_order() {
    let store = scenario_store();
    let cache = Arc::new(AnalysisCache::new(store.clone()));
    let channel = Arc::new(RecordingChannel::default());
    let config = DispatchConfig {
        analyze_on_start: false,
        ..DispatchConfig::default()
    };
    let dispatcher = EventDispatcher::start(cache.clone(), channel, &config);

    let (_, renamed) = store
        .update(
            "20",
            ChangeInfo {
                title: Some("Headlines".to_string()),
                url: None,
            },
        )
        .unwrap();
    let (_, url_edit) = store
        .update(
            "21",
            ChangeInfo {
                title: None,
                url: Some("https://hn.example".to_string()),
            },
        )
        .unwrap();
    let (_, moved) = store.move_node("12", Some("20"), None).unwrap();
    let removed = store.remove("11").unwrap();

    for event in [renamed, url_edit, moved, removed] {
        dispatcher.dispatch(event).unwrap();
    }
    dispatcher.flush().await.unwrap();

    let stats = dispatcher.stats();
    assert_eq!(stats.processed, 4);
    assert_eq!(stats.recomputations, 3);
    assert_eq!(stats.failed_recomputations, 0);

    let snapshot = cache.current().unwrap();
    assert_eq!(snapshot.get("20").unwrap().path, "Bar/Headlines");
    assert_eq!(snapshot.get("20").unwrap().bookmark_count, 3);
    assert_eq!(snapshot.get("10").unwrap().bookmark_count, 0);
    assert_eq!(snapshot.total_bookmarks(), 3);

    dispatcher.shutdown().await.unwrap();
}

#[tokio::test]
async fn full_queue_rejects_events() {
    let store = scenario_store();
    let cache = Arc::new(AnalysisCache::new(store));
    let channel = Arc::new(RecordingChannel::default());
    let config = DispatchConfig {
        queue_capacity: 1,
        analyze_on_start: false,
    };
    let dispatcher = EventDispatcher::start(cache, channel, &config);

    let event = BookmarkEvent::Created {
        id: "20".to_string(),
        node: BookmarkNode::folder("20", "News"),
    };
    let results: Vec<_> = (0..64)
        .map(|_| dispatcher.dispatch(event.clone()))
        .collect();
    assert!(results.iter().any(|r| r.is_err()));

    dispatcher.flush().await.unwrap();
    dispatcher.shutdown().await.unwrap();
}
