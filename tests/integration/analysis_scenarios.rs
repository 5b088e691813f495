use smartmarks::store::{BookmarkNode, InMemoryBookmarkStore};
use smartmarks::suggest::suggest_folders;
use smartmarks::tree::{analyze, AnalysisOptions};

use crate::integration::support::{deep_tree, scenario_store, SwitchableStore};

#[tokio::test]
async fn scenario_totals_count_root_folder() {
    let store = scenario_store();
    let snapshot = analyze(&*store, &AnalysisOptions::default())
        .await
        .unwrap();

    assert_eq!(snapshot.total_bookmarks(), 4);
    assert_eq!(snapshot.total_folders(), 3);

    let summary = serde_json::to_value(snapshot.summary()).unwrap();
    assert_eq!(summary["totalBookmarks"], 4);
    assert_eq!(summary["totalFolders"], 3);
}

#[tokio::test]
async fn scenario_folder_records() {
    let store = scenario_store();
    let snapshot = analyze(&*store, &AnalysisOptions::default())
        .await
        .unwrap();

    let bar = snapshot.get("1").unwrap();
    assert_eq!(bar.path, "Bar");
    assert_eq!(bar.bookmark_count, 0);
    assert!(bar.keywords.is_empty());

    let dev = snapshot.get("10").unwrap();
    assert_eq!(dev.path, "Bar/Development");
    assert_eq!(dev.bookmark_count, 2);
    for keyword in ["github", "stack", "overflow", "stackoverflow"] {
        assert!(dev.keywords.contains(keyword), "missing {}", keyword);
    }
    assert!(!dev.keywords.contains("https"));
    assert!(!dev.keywords.contains("com"));

    let news = snapshot.get("20").unwrap();
    assert_eq!(news.path, "Bar/News");
    assert_eq!(news.bookmark_count, 2);

    let roots: Vec<&str> = snapshot
        .root_folders()
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(roots, vec!["1"]);
}

#[tokio::test]
async fn scenario_suggests_development_for_code_hosting() {
    let store = scenario_store();
    let snapshot = analyze(&*store, &AnalysisOptions::default())
        .await
        .unwrap();

    let suggestions = suggest_folders("GitHub Gists", "https://gist.github.com", &snapshot);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, "10");

    assert!(suggest_folders("a an to", "", &snapshot).is_empty());
    assert!(suggest_folders("Gardening tips", "https://plants.example", &snapshot).is_empty());
}

#[tokio::test]
async fn deep_tree_paths_are_fully_resolved() {
    let depth = 12;
    let store = InMemoryBookmarkStore::from_tree(deep_tree(depth)).unwrap();
    let snapshot = analyze(&store, &AnalysisOptions::default()).await.unwrap();

    assert_eq!(snapshot.total_folders(), depth + 1);
    assert_eq!(snapshot.total_bookmarks(), depth + 1);

    let mut expected = String::from("Level 0");
    assert_eq!(snapshot.get("f0").unwrap().path, expected);
    for level in 1..=depth {
        expected = format!("{}/Level {}", expected, level);
        assert_eq!(snapshot.get(&format!("f{}", level)).unwrap().path, expected);
    }
}

#[tokio::test]
async fn every_child_path_extends_its_parent() {
    let store = InMemoryBookmarkStore::from_tree(deep_tree(6)).unwrap();
    store.create("f3", "Side Branch", None).unwrap();
    let snapshot = analyze(&store, &AnalysisOptions::default()).await.unwrap();

    for folder in snapshot.iter() {
        let Some(parent) = folder.parent_id.as_deref().and_then(|p| snapshot.get(p)) else {
            continue;
        };
        assert_eq!(folder.path, format!("{}/{}", parent.path, folder.title));
    }

    let summed: usize = snapshot.iter().map(|f| f.bookmark_count).sum();
    assert_eq!(summed, snapshot.total_bookmarks());
    assert_eq!(snapshot.iter().count(), snapshot.total_folders());
}

#[tokio::test]
async fn untitled_folders_and_empty_store() {
    let empty = InMemoryBookmarkStore::new();
    let snapshot = analyze(&empty, &AnalysisOptions::default()).await.unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.total_bookmarks(), 0);

    let store = InMemoryBookmarkStore::from_tree(vec![BookmarkNode::folder("0", "")
        .with_children(vec![BookmarkNode::folder("5", "Recipes")])])
    .unwrap();
    let snapshot = analyze(&store, &AnalysisOptions::default()).await.unwrap();
    assert_eq!(snapshot.get("0").unwrap().title, "Unnamed Folder");
    assert_eq!(snapshot.get("5").unwrap().path, "Unnamed Folder/Recipes");
}

#[tokio::test]
async fn unreadable_folder_does_not_hide_its_siblings() {
    let store = SwitchableStore::new(scenario_store());
    store.set_unreadable_folder("20");
    let snapshot = analyze(&store, &AnalysisOptions::default()).await.unwrap();

    let news = snapshot.get("20").unwrap();
    assert_eq!(news.path, "Bar/News");
    assert_eq!(news.bookmark_count, 0);
    assert!(news.keywords.is_empty());

    let dev = snapshot.get("10").unwrap();
    assert_eq!(dev.bookmark_count, 2);
    assert!(dev.keywords.contains("github"));
    assert!(dev.keywords.contains("overflow"));

    assert_eq!(snapshot.total_folders(), 3);
    assert_eq!(snapshot.total_bookmarks(), 2);
}

#[tokio::test]
async fn long_folder_chain_is_analyzed() {
    let store = InMemoryBookmarkStore::from_tree(vec![BookmarkNode::folder("1", "Bar")]).unwrap();
    let mut deepest = "1".to_string();
    for _ in 0..1200 {
        let (folder, _) = store.create(&deepest, "Nested", None).unwrap();
        deepest = folder.id;
    }
    store.create(&deepest, "Rust Book", Some("https://doc.rust-lang.org/book")).unwrap();

    let snapshot = analyze(&store, &AnalysisOptions::default()).await.unwrap();
    assert_eq!(snapshot.total_folders(), 1201);
    assert_eq!(snapshot.total_bookmarks(), 1);

    let leaf_folder = snapshot.get(&deepest).unwrap();
    assert_eq!(leaf_folder.bookmark_count, 1);
    assert_eq!(leaf_folder.path.matches("/Nested").count(), 1200);
    assert!(leaf_folder.path.starts_with("Bar/Nested/"));
}
