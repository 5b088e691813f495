use smartmarks::cache::AnalysisCache;
use smartmarks::error::ApiError;
use std::sync::Arc;

use crate::integration::support::{scenario_store, SwitchableStore};

#[tokio::test]
async fn repeated_reads_share_one_snapshot() {
    let cache = AnalysisCache::new(scenario_store());
    let first = cache.get_or_analyze().await.unwrap();
    let second = cache.get_or_analyze().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn concurrent_first_reads_analyze_once() {
    let cache = Arc::new(AnalysisCache::new(scenario_store()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_or_analyze().await.unwrap() })
        })
        .collect();

    let mut snapshots = Vec::new();
    for handle in handles {
        snapshots.push(handle.await.unwrap());
    }
    for snapshot in &snapshots[1..] {
        assert!(Arc::ptr_eq(&snapshots[0], snapshot));
    }
}

#[tokio::test]
async fn forced_analysis_sees_store_mutations() {
    let store = scenario_store();
    let cache = AnalysisCache::new(store.clone());
    let before = cache.get_or_analyze().await.unwrap();
    assert_eq!(before.total_bookmarks(), 4);

    store
        .create("20", "BBC World News", Some("https://bbc.co.uk/news"))
        .unwrap();
    assert_eq!(cache.get_or_analyze().await.unwrap().total_bookmarks(), 4);

    let after = cache.force_analyze().await.unwrap();
    assert_eq!(after.total_bookmarks(), 5);
    assert_eq!(after.get("20").unwrap().bookmark_count, 3);
}

#[tokio::test]
async fn outage_keeps_last_good_snapshot() {
    let store = Arc::new(SwitchableStore::new(scenario_store()));
    let cache = AnalysisCache::new(store.clone());
    let good = cache.force_analyze().await.unwrap();

    store.set_failing(true);
    let err = cache.force_analyze().await.unwrap_err();
    assert!(matches!(err, ApiError::AnalysisFailed(_)));
    assert!(err.to_string().starts_with("Failed to analyze bookmarks"));

    let held = cache.get_or_analyze().await.unwrap();
    assert!(Arc::ptr_eq(&good, &held));

    store.set_failing(false);
    let fresh = cache.force_analyze().await.unwrap();
    assert!(!Arc::ptr_eq(&good, &fresh));
}

#[tokio::test]
async fn suggest_through_cache_is_bounded() {
    let store = scenario_store();
    for i in 0..8 {
        let (folder, _) = store.create("1", &format!("Rust {}", i), None).unwrap();
        store
            .create(&folder.id, "Rust Crates", Some("https://crates.io/rust"))
            .unwrap();
    }
    let cache = AnalysisCache::new(store);
    let ranked = cache.suggest(Some("Rust Crates"), None).await.unwrap();
    assert_eq!(ranked.len(), 5);
    assert!(ranked.iter().all(|r| r.bookmark_count > 0));
    assert!(ranked.iter().all(|r| r.score == 2));
}
