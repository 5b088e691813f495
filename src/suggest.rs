//! Folder Suggestions
//!
//! Ranks analyzed folders as destinations for a bookmark by how many of the bookmark's
//! keywords each folder's vocabulary already contains. Returns a bounded, deterministic list.

use crate::tree::{AnalysisOptions, AnalysisSnapshot, FolderRecord, KeywordSet};

/// A folder together with its keyword-overlap score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredFolder<'a> {
    pub folder: &'a FolderRecord,
    pub score: usize,
}

/// Rank folders of `snapshot` for a bookmark with the given title and URL.
///
/// Folders without direct bookmarks and folders sharing no keyword are skipped. Equal
/// scores keep the snapshot's iteration order. At most `options.max_suggestions` results.
pub fn rank_folders<'a>(
    title: Option<&str>,
    url: Option<&str>,
    snapshot: &'a AnalysisSnapshot,
    options: &AnalysisOptions,
) -> Vec<ScoredFolder<'a>> {
    let mut candidate = KeywordSet::new();
    options.extractor.extract_into(title, &mut candidate);
    options.extractor.extract_into(url, &mut candidate);

    if candidate.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredFolder<'a>> = snapshot
        .iter()
        .filter(|folder| folder.bookmark_count > 0)
        .filter_map(|folder| {
            let score = candidate
                .iter()
                .filter(|keyword| folder.keywords.contains(*keyword))
                .count();
            (score > 0).then_some(ScoredFolder { folder, score })
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(options.max_suggestions);
    scored
}

/// Suggest up to five folders for a bookmark using the default keyword rules
pub fn suggest_folders<'a>(
    title: &str,
    url: &str,
    snapshot: &'a AnalysisSnapshot,
) -> Vec<&'a FolderRecord> {
    rank_folders(Some(title), Some(url), snapshot, &AnalysisOptions::default())
        .into_iter()
        .map(|scored| scored.folder)
        .collect()
}
