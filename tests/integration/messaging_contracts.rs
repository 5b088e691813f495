use serde_json::json;
use smartmarks::cache::AnalysisCache;
use smartmarks::messaging::{handle_message, handle_request, Request, Response};
use std::sync::Arc;

use crate::integration::support::{scenario_store, SwitchableStore};

#[tokio::test]
async fn get_bookmark_analysis_contract() {
    let cache = AnalysisCache::new(scenario_store());
    let response = handle_message(&cache, &json!({"action": "getBookmarkAnalysis"})).await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"status": "success", "data": {"totalBookmarks": 4, "totalFolders": 3}})
    );
}

#[tokio::test]
async fn suggest_folders_contract() {
    let cache = AnalysisCache::new(scenario_store());
    let response = handle_request(
        &cache,
        Request::SuggestFolders {
            title: "World Reuters Business".to_string(),
            url: Some("https://reuters.com/business".to_string()),
        },
    )
    .await;

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["status"], "success");
    let suggestions = value["data"]["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0],
        json!({"id": "20", "title": "News", "path": "Bar/News", "bookmarkCount": 2})
    );
}

#[tokio::test]
async fn unknown_action_is_an_error_response() {
    let cache = AnalysisCache::new(scenario_store());
    let response = handle_message(&cache, &json!({"action": "exportSettings"})).await;

    assert!(!response.is_success());
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value["message"].as_str().unwrap().contains("exportSettings"));
}

#[tokio::test]
async fn analysis_failure_is_reported_in_envelope() {
    let store = Arc::new(SwitchableStore::new(scenario_store()));
    store.set_failing(true);
    let cache = AnalysisCache::new(store);

    let response = handle_request(&cache, Request::GetBookmarkAnalysis).await;
    match response {
        Response::Error { message } => {
            assert!(message.starts_with("Failed to analyze bookmarks"));
        }
        other => panic!("expected error response, got {:?}", other),
    }
}
