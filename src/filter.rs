//! Search and collection filtering over a loaded video list.
//!
//! Everything here is pure: same inputs, same output, input order preserved.

use std::collections::HashSet;

use crate::video::{PlaylistRef, Video};

/// Check if a video passes both the collection selector and the text query.
///
/// The query is trimmed and matched case-insensitively as a substring of the
/// title, description, any tag, or any playlist title. A blank query matches
/// everything; `None` for `collection` means "All Videos".
pub fn matches(video: &Video, query: &str, collection: Option<&str>) -> bool {
  if let Some(id) = collection
    && !video.in_collection(id)
  {
    return false;
  }
  let needle = query.trim().to_lowercase();
  if needle.is_empty() {
    return true;
  }
  let hit = |s: &str| s.to_lowercase().contains(&needle);
  hit(video.title.as_str())
    || hit(video.description.as_str())
    || video.tags.iter().any(|t| hit(t.as_str()))
    || video.playlists.iter().any(|p| hit(p.title.as_str()))
}

/// Indices into `videos` of the entries that pass [`matches`].
pub fn filter_indices(videos: &[Video], query: &str, collection: Option<&str>) -> Vec<usize> {
  videos.iter().enumerate().filter(|(_, v)| matches(v, query, collection)).map(|(i, _)| i).collect()
}

#[cfg(test)]
pub fn filter_videos<'a>(videos: &'a [Video], query: &str, collection: Option<&str>) -> Vec<&'a Video> {
  videos.iter().filter(|v| matches(v, query, collection)).collect()
}

/// Distinct playlists across all videos, sorted by title.
///
/// Deduplicated by id; the first title seen for an id wins. Ties keep
/// first-seen order.
pub fn collections(videos: &[Video]) -> Vec<PlaylistRef> {
  let mut seen = HashSet::new();
  let mut out: Vec<PlaylistRef> =
    videos.iter().flat_map(|v| v.playlists.iter()).filter(|p| seen.insert(p.id.as_str())).cloned().collect();
  out.sort_by(|a, b| a.title.cmp(&b.title));
  out
}

/// Direct lookup by id over the full, unfiltered list.
pub fn find_video<'a>(videos: &'a [Video], id: &str) -> Option<&'a Video> {
  videos.iter().find(|v| v.id == id)
}
