use anyhow::Result;
use image::DynamicImage;
use ratatui::{
  layout::Rect,
  widgets::{ListState, TableState},
};
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::constants;
use crate::display::ThumbnailMode;
use crate::filter::{collections, filter_indices, find_video};
use crate::store::{StoreSnapshot, VideoStore};
use crate::theme::{THEMES, theme_index};
use crate::thumbnail::fetch_thumbnail;
use crate::video::{PlaylistRef, Video};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
  Gallery,
  Admin,
  Detail { id: String },
}

/// Keyboard focus within the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Search,
  Browse,
  Collections,
}

/// Gallery card size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
  Large,
  Medium,
  List,
}

impl Density {
  pub const ALL: [Density; 3] = [Density::Large, Density::Medium, Density::List];

  /// Short name stored in `prefs.toml`.
  pub fn key(self) -> &'static str {
    match self {
      Density::Large => "large",
      Density::Medium => "medium",
      Density::List => "list",
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      Density::Large => "Large grid",
      Density::Medium => "Medium grid",
      Density::List => "List view",
    }
  }

  pub fn from_config(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "medium" => Density::Medium,
      "list" => Density::List,
      _ => Density::Large,
    }
  }

  pub fn next(self) -> Self {
    let idx = Density::ALL.iter().position(|d| *d == self).unwrap_or(0);
    Density::ALL[(idx + 1) % Density::ALL.len()]
  }
}

/// Thumbnail for the video shown in the detail view.
#[derive(Default)]
pub struct ThumbCache {
  /// Video the cached result belongs to.
  pub video_id: Option<String>,
  /// `None` with `video_id` set means the fetch failed or no variant exists.
  pub image: Option<DynamicImage>,
  pub resized: Option<(Rect, DynamicImage)>,
  pending: Option<(String, oneshot::Receiver<Result<DynamicImage>>)>,
}

impl ThumbCache {
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}

pub struct App {
  pub store: VideoStore,
  pub snapshot: StoreSnapshot,
  store_rx: watch::Receiver<StoreSnapshot>,
  pub view: View,
  /// Where "back" from the detail view returns to.
  pub return_view: View,
  pub mode: AppMode,
  pub query: String,
  pub cursor_position: usize,
  pub input_scroll: usize,
  /// Selected collection (playlist id). `None` is "All Videos".
  pub collection: Option<String>,
  pub collections: Vec<PlaylistRef>,
  /// Row 0 is "All Videos", row `n` is `collections[n - 1]`.
  pub sidebar_state: ListState,
  /// Indices into `snapshot.videos` that pass the current query and collection.
  pub filtered_indices: Vec<usize>,
  pub list_state: ListState,
  pub admin_state: TableState,
  pub density: Density,
  pub theme_index: usize,
  pub thumbnail_mode: ThumbnailMode,
  pub thumbs: ThumbCache,
  http_client: Client,
  pub last_error: Option<String>,
  pub status_message: Option<String>,
  /// A load was requested and no settled snapshot has arrived yet.
  pub load_pending: bool,
  pub should_quit: bool,
  error_time: Option<Instant>,
  persist_prefs: bool,
}

impl App {
  pub fn new(store: VideoStore, thumbnail_mode: ThumbnailMode, config: &Config) -> Self {
    let theme_index = config.theme_name.as_deref().and_then(theme_index).unwrap_or(0);
    let density = config.density.as_deref().map_or(Density::Large, Density::from_config);
    let store_rx = store.subscribe();
    let snapshot = store.snapshot();

    let mut app = Self {
      store,
      snapshot,
      store_rx,
      view: View::Gallery,
      return_view: View::Gallery,
      mode: AppMode::Browse,
      query: String::new(),
      cursor_position: 0,
      input_scroll: 0,
      collection: None,
      collections: Vec::new(),
      sidebar_state: ListState::default().with_selected(Some(0)),
      filtered_indices: Vec::new(),
      list_state: ListState::default(),
      admin_state: TableState::default(),
      density,
      theme_index,
      thumbnail_mode,
      thumbs: ThumbCache::default(),
      http_client: Client::new(),
      last_error: None,
      status_message: None,
      load_pending: false,
      should_quit: false,
      error_time: None,
      persist_prefs: true,
    };
    app.refresh_derived();
    app
  }

  /// Disable writing `prefs.toml` (used by tests).
  #[cfg(test)]
  pub(crate) fn without_persistence(mut self) -> Self {
    self.persist_prefs = false;
    self
  }

  pub fn theme(&self) -> &'static crate::theme::Theme {
    // Index is always < THEMES.len(): set from theme_index() or wrapped in next_theme().
    &THEMES[self.theme_index]
  }

  pub fn videos(&self) -> &[Video] {
    &self.snapshot.videos
  }

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after the configured delay.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(constants().error_dismiss_secs)
    {
      self.last_error = None;
      self.error_time = None;
    }
  }

  fn save_config(&self) {
    if !self.persist_prefs {
      return;
    }
    let mut config = Config::load();
    config.theme_name = Some(self.theme().name.to_string());
    config.density = Some(self.density.key().to_string());
    config.save();
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.save_config();
  }

  pub fn next_density(&mut self) {
    self.density = self.density.next();
    debug!(density = self.density.key(), "density changed");
    self.save_config();
  }

  // --- Store ---

  /// Kick off the store load on a background task.
  pub fn start_loading(&mut self) {
    let store = self.store.clone();
    self.status_message = Some("Loading videos…".to_string());
    self.load_pending = true;
    tokio::spawn(async move { store.load().await });
  }

  /// Replace the local snapshot and rebuild everything derived from it.
  pub fn apply_snapshot(&mut self, snapshot: StoreSnapshot) {
    self.snapshot = snapshot;
    if !self.snapshot.loading {
      self.status_message = None;
      self.load_pending = false;
    }
    self.refresh_derived();
  }

  fn refresh_derived(&mut self) {
    self.collections = collections(&self.snapshot.videos);
    if let Some(ref id) = self.collection
      && !self.collections.iter().any(|c| &c.id == id)
    {
      self.collection = None;
    }
    self.sync_sidebar_selection();
    self.recompute_filter();
    if self.admin_state.selected().is_none() && !self.snapshot.videos.is_empty() {
      self.admin_state.select(Some(0));
    }
  }

  pub async fn check_pending(&mut self) -> Result<()> {
    if self.store_rx.has_changed().unwrap_or(false) {
      let snapshot = self.store_rx.borrow_and_update().clone();
      self.apply_snapshot(snapshot);
    }

    if let Some((id, mut rx)) = self.thumbs.pending.take() {
      match rx.try_recv() {
        Ok(result) => {
          match result {
            Ok(image) => self.thumbs.image = Some(image),
            Err(e) => {
              debug!(video_id = %id, err = %e, "thumbnail unavailable");
              self.thumbs.image = None;
            }
          }
          self.thumbs.video_id = Some(id);
          self.thumbs.resized = None;
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.thumbs.pending = Some((id, rx));
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.thumbs.video_id = Some(id);
          self.thumbs.image = None;
        }
      }
    }

    self.ensure_thumbnail();
    Ok(())
  }

  /// Start fetching the detail view's thumbnail if it isn't cached or in flight.
  fn ensure_thumbnail(&mut self) {
    if !self.thumbnail_mode.enabled() {
      return;
    }
    let View::Detail { id } = &self.view else { return };
    if self.thumbs.video_id.as_deref() == Some(id.as_str()) || self.thumbs.pending.as_ref().is_some_and(|(p, _)| p == id)
    {
      return;
    }
    let Some(video) = find_video(&self.snapshot.videos, id) else { return };

    let video = video.clone();
    let client = self.http_client.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(fetch_thumbnail(&client, &video).await);
    });
    self.thumbs.pending = Some((id.clone(), rx));
  }

  // --- Filtering ---

  /// Rebuild `filtered_indices` from the snapshot, query and collection.
  /// Clamps the list selection to stay within the filtered range.
  pub fn recompute_filter(&mut self) {
    self.filtered_indices = filter_indices(&self.snapshot.videos, &self.query, self.collection.as_deref());
    if self.filtered_indices.is_empty() {
      self.list_state.select(None);
    } else {
      let sel = self.list_state.selected().unwrap_or(0);
      self.list_state.select(Some(sel.min(self.filtered_indices.len() - 1)));
    }
  }

  pub fn visible_videos(&self) -> impl Iterator<Item = &Video> {
    self.filtered_indices.iter().filter_map(|&i| self.snapshot.videos.get(i))
  }

  pub fn selected_video(&self) -> Option<&Video> {
    let sel = self.list_state.selected()?;
    let &idx = self.filtered_indices.get(sel)?;
    self.snapshot.videos.get(idx)
  }

  pub fn selected_admin_video(&self) -> Option<&Video> {
    self.snapshot.videos.get(self.admin_state.selected()?)
  }

  /// Select a collection, or clear the selection when it's already active.
  pub fn toggle_collection(&mut self, id: Option<String>) {
    self.collection = if id.is_some() && self.collection == id { None } else { id };
    info!(collection = ?self.collection, "collection filter changed");
    self.sync_sidebar_selection();
    self.list_state.select(Some(0));
    self.recompute_filter();
  }

  /// Apply the sidebar row under the cursor.
  pub fn activate_sidebar(&mut self) {
    let row = self.sidebar_state.selected().unwrap_or(0);
    let id = if row == 0 { None } else { self.collections.get(row - 1).map(|c| c.id.clone()) };
    self.toggle_collection(id);
  }

  fn sync_sidebar_selection(&mut self) {
    let row = match &self.collection {
      Some(id) => self.collections.iter().position(|c| &c.id == id).map_or(0, |i| i + 1),
      None => 0,
    };
    self.sidebar_state.select(Some(row));
  }

  pub fn set_query(&mut self, query: String) {
    self.query = query;
    self.cursor_position = self.query.chars().count();
    self.recompute_filter();
  }

  // --- Navigation ---

  pub fn open_detail(&mut self, id: String) {
    info!(video_id = %id, "opening detail view");
    if !matches!(self.view, View::Detail { .. }) {
      self.return_view = self.view.clone();
    }
    self.view = View::Detail { id };
  }

  pub fn open_selected(&mut self) {
    let id = match self.view {
      View::Gallery => self.selected_video().map(|v| v.id.clone()),
      View::Admin => self.selected_admin_video().map(|v| v.id.clone()),
      View::Detail { .. } => None,
    };
    if let Some(id) = id {
      self.open_detail(id);
    }
  }

  pub fn back(&mut self) {
    self.view = std::mem::replace(&mut self.return_view, View::Gallery);
  }

  pub fn show_admin(&mut self) {
    self.view = View::Admin;
  }

  pub fn show_gallery(&mut self) {
    self.view = View::Gallery;
  }

  /// The video for the detail view, looked up in the full list.
  pub fn detail_video(&self) -> Option<&Video> {
    match &self.view {
      View::Detail { id } => find_video(&self.snapshot.videos, id),
      _ => None,
    }
  }

  // --- External links ---

  /// Open `url` in the default browser.
  pub fn open_url(&mut self, url: &str) {
    info!(url = %url, "opening in browser");
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(not(target_os = "macos"))]
    let cmd = "xdg-open";
    match std::process::Command::new(cmd)
      .arg(url)
      .stdin(std::process::Stdio::null())
      .stdout(std::process::Stdio::null())
      .stderr(std::process::Stdio::null())
      .spawn()
    {
      Ok(mut child) => {
        // Reap the child in a background thread to avoid zombie processes.
        std::thread::spawn(move || {
          let _ = child.wait();
        });
      }
      Err(e) => {
        warn!(url = %url, err = %e, "failed to open browser");
        self.set_error(format!("Failed to open browser: {}", e));
      }
    }
  }
}

// --- List navigation helpers ---

/// Move a list selection by one, wrapping at both ends.
pub fn step_selection(selected: Option<usize>, count: usize, forward: bool) -> Option<usize> {
  if count == 0 {
    return None;
  }
  Some(match selected {
    None => 0,
    Some(i) if forward => (i + 1) % count,
    Some(0) => count - 1,
    Some(i) => (i - 1).min(count - 1),
  })
}
