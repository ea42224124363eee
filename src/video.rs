use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::constants::constants;

/// One thumbnail variant as published in `videos.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
  pub url: String,
  pub width: u32,
  pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
  #[serde(default)]
  pub high: Option<Thumbnail>,
  #[serde(default)]
  pub standard: Option<Thumbnail>,
}

/// A playlist a video belongs to. Playlists are shown as "collections".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
  pub id: String,
  pub title: String,
}

/// A single record from `videos.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
  pub id: String,
  pub url: String,
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub upload_date: String,
  #[serde(default)]
  pub tags: Vec<String>,
  pub privacy_status: String,
  #[serde(default)]
  pub thumbnails: Thumbnails,
  pub channel_id: String,
  #[serde(default)]
  pub category_id: Option<String>,
  #[serde(default = "default_view_count")]
  pub view_count: String,
  #[serde(default)]
  pub playlists: Vec<PlaylistRef>,
}

fn default_view_count() -> String {
  "0".to_string()
}

impl Video {
  /// Deep link into YouTube Studio's edit page for this video.
  pub fn studio_url(&self) -> String {
    constants().studio_url_template.replace("{id}", &self.id)
  }

  /// Preferred thumbnail for previews: `standard`, then `high`.
  pub fn thumbnail(&self) -> Option<&Thumbnail> {
    self.thumbnails.standard.as_ref().or(self.thumbnails.high.as_ref())
  }

  /// Upload date as `YYYY-MM-DD`, or the raw string if it isn't RFC 3339.
  pub fn upload_day(&self) -> String {
    DateTime::parse_from_rfc3339(&self.upload_date)
      .map(|dt| dt.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|_| self.upload_date.clone())
  }

  pub fn is_public(&self) -> bool {
    self.privacy_status == "public"
  }

  pub fn in_collection(&self, collection_id: &str) -> bool {
    self.playlists.iter().any(|p| p.id == collection_id)
  }
}
