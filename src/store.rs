//! Fetch-once video store.
//!
//! `VideoStore::load` is the only mutation. Consumers read immutable
//! snapshots or subscribe to a `watch` channel that is notified on every
//! state change.

use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::constants::constants;
use crate::error::LoadError;
use crate::video::Video;

/// Where `videos.json` comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
  /// Served over HTTP at `{base_url}/videos.json`.
  Http { base_url: String },
  /// A local copy of the generated file.
  File { path: PathBuf },
}

impl VideoSource {
  pub fn http(base_url: impl Into<String>) -> Self {
    VideoSource::Http { base_url: base_url.into() }
  }

  /// Human-readable location, used in logs and the status line.
  pub fn location(&self) -> String {
    match self {
      VideoSource::Http { base_url } => endpoint_url(base_url),
      VideoSource::File { path } => path.display().to_string(),
    }
  }
}

fn endpoint_url(base_url: &str) -> String {
  format!("{}/{}", base_url.trim_end_matches('/'), constants().videos_file)
}

/// Point-in-time view of the store.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
  pub videos: Arc<[Video]>,
  pub loading: bool,
  pub error: Option<LoadError>,
}

impl Default for StoreSnapshot {
  fn default() -> Self {
    Self { videos: Arc::from(Vec::new()), loading: false, error: None }
  }
}

impl StoreSnapshot {
  /// The error text, or an empty string when the last load succeeded.
  pub fn error_message(&self) -> String {
    self.error.as_ref().map(ToString::to_string).unwrap_or_default()
  }
}

/// Clears the loading flag when dropped, so every exit from `load`
/// (success, failure, or the future being dropped) resets it exactly once.
struct LoadingGuard<'a> {
  state: &'a watch::Sender<StoreSnapshot>,
}

impl Drop for LoadingGuard<'_> {
  fn drop(&mut self) {
    self.state.send_modify(|s| s.loading = false);
  }
}

#[derive(Clone)]
pub struct VideoStore {
  client: Client,
  source: Arc<VideoSource>,
  state: Arc<watch::Sender<StoreSnapshot>>,
}

impl VideoStore {
  pub fn new(source: VideoSource) -> Self {
    Self::with_client(Client::new(), source)
  }

  pub fn with_client(client: Client, source: VideoSource) -> Self {
    let (tx, _) = watch::channel(StoreSnapshot::default());
    Self { client, source: Arc::new(source), state: Arc::new(tx) }
  }

  pub fn source(&self) -> &VideoSource {
    &self.source
  }

  pub fn snapshot(&self) -> StoreSnapshot {
    self.state.borrow().clone()
  }

  pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
    self.state.subscribe()
  }

  /// Fetch the video list unless it is already loaded or a load is in flight.
  ///
  /// The loading flag is claimed under the channel lock before any I/O, so
  /// concurrent callers never start a second request.
  pub async fn load(&self) {
    let claimed = self.state.send_if_modified(|s| {
      if s.loading || !s.videos.is_empty() {
        return false;
      }
      s.loading = true;
      true
    });
    if !claimed {
      debug!("store: load skipped, already loaded or in flight");
      return;
    }
    let _guard = LoadingGuard { state: &self.state };

    let location = self.source.location();
    info!(source = %location, "store: loading videos");

    match self.fetch().await {
      Ok(videos) => {
        info!(count = videos.len(), "store: videos loaded");
        self.state.send_modify(|s| {
          s.videos = Arc::from(videos);
          s.error = None;
        });
      }
      Err(e) => {
        warn!(source = %location, err = %e, "store: load failed");
        self.state.send_modify(|s| {
          s.videos = Arc::from(Vec::new());
          s.error = Some(e);
        });
      }
    }
  }

  async fn fetch(&self) -> Result<Vec<Video>, LoadError> {
    let body = match self.source.as_ref() {
      VideoSource::Http { base_url } => {
        let response = self
          .client
          .get(endpoint_url(base_url))
          .header(CACHE_CONTROL, "no-cache")
          .header(PRAGMA, "no-cache")
          .send()
          .await?;
        let status = response.status();
        if !status.is_success() {
          return Err(LoadError::HttpStatus(status.as_u16()));
        }
        response.bytes().await?.to_vec()
      }
      VideoSource::File { path } => tokio::fs::read(path).await?,
    };
    Ok(serde_json::from_slice(&body)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::video::tests::{sample_json, sample_videos};
  use std::io::Write;
  use std::time::Duration;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn store_for(server: &MockServer) -> VideoStore {
    VideoStore::new(VideoSource::http(server.uri()))
  }

  #[test]
  fn endpoint_url_joins_base() {
    assert_eq!(endpoint_url("http://host/gallery"), "http://host/gallery/videos.json");
    assert_eq!(endpoint_url("http://host/gallery/"), "http://host/gallery/videos.json");
  }

  #[tokio::test]
  async fn starts_idle_and_empty() {
    let store = VideoStore::new(VideoSource::http("http://127.0.0.1:9"));
    let snap = store.snapshot();
    assert!(snap.videos.is_empty());
    assert!(!snap.loading);
    assert_eq!(snap.error_message(), "");
  }

  #[tokio::test]
  async fn successful_load_replaces_list_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()))
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;

    let snap = store.snapshot();
    assert_eq!(snap.videos.as_ref(), sample_videos().as_slice());
    assert!(!snap.loading);
    assert!(snap.error.is_none());
  }

  #[tokio::test]
  async fn request_bypasses_caches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .and(header("cache-control", "no-cache"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()))
      .expect(1)
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;
    assert_eq!(store.snapshot().videos.len(), 3);
  }

  #[tokio::test]
  async fn server_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;

    let snap = store.snapshot();
    assert!(snap.videos.is_empty());
    assert!(!snap.loading);
    assert_eq!(snap.error, Some(LoadError::HttpStatus(500)));
    assert!(snap.error_message().contains("500"));
    assert!(snap.error_message().starts_with("Failed to fetch videos"));
  }

  #[tokio::test]
  async fn not_found_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

    let store = store_for(&server);
    store.load().await;
    assert_eq!(store.snapshot().error_message(), "Failed to fetch videos: 404");
  }

  #[tokio::test]
  async fn malformed_json_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;

    let snap = store.snapshot();
    assert!(snap.videos.is_empty());
    assert!(matches!(snap.error, Some(LoadError::Parse(_))));
    assert!(!snap.error_message().is_empty());
  }

  #[tokio::test]
  async fn empty_array_loads_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;

    let snap = store.snapshot();
    assert!(snap.videos.is_empty());
    assert!(snap.error.is_none());
    assert!(!snap.loading);
  }

  #[tokio::test]
  async fn second_load_after_success_does_not_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()))
      .expect(1)
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;
    store.load().await;
    assert_eq!(store.snapshot().videos.len(), 3);
  }

  #[tokio::test]
  async fn concurrent_loads_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()).set_delay(Duration::from_millis(100)))
      .expect(1)
      .mount(&server)
      .await;

    let store = store_for(&server);
    let other = store.clone();
    tokio::join!(store.load(), other.load());
    assert_eq!(store.snapshot().videos.len(), 3);
  }

  #[tokio::test]
  async fn failed_load_can_be_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(503))
      .expect(2)
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;
    store.load().await;
    assert_eq!(store.snapshot().error, Some(LoadError::HttpStatus(503)));
  }

  #[tokio::test]
  async fn success_after_failure_clears_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(500))
      .up_to_n_times(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()))
      .mount(&server)
      .await;

    let store = store_for(&server);
    store.load().await;
    assert_eq!(store.snapshot().error, Some(LoadError::HttpStatus(500)));

    store.load().await;
    let snap = store.snapshot();
    assert!(snap.error.is_none());
    assert_eq!(snap.error_message(), "");
    assert_eq!(&*snap.videos, sample_videos().as_slice());
    assert!(!snap.loading);
  }

  #[tokio::test]
  async fn dropped_load_clears_loading_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()).set_delay(Duration::from_secs(5)))
      .mount(&server)
      .await;

    let store = store_for(&server);
    let timed_out = tokio::time::timeout(Duration::from_millis(50), store.load()).await;
    assert!(timed_out.is_err());

    let snap = store.snapshot();
    assert!(!snap.loading);
    assert!(snap.videos.is_empty());
  }

  #[tokio::test]
  async fn unreachable_host_is_a_transport_failure() {
    let store = VideoStore::new(VideoSource::http("http://127.0.0.1:1"));
    store.load().await;

    let snap = store.snapshot();
    assert!(matches!(snap.error, Some(LoadError::Transport(_))));
    assert!(!snap.error_message().is_empty());
    assert!(!snap.loading);
  }

  #[tokio::test]
  async fn subscribers_see_loading_then_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/videos.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()).set_delay(Duration::from_millis(100)))
      .mount(&server)
      .await;

    let store = store_for(&server);
    let mut rx = store.subscribe();
    let loader = store.clone();
    let handle = tokio::spawn(async move { loader.load().await });

    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().loading);

    handle.await.unwrap();
    let snap = rx.borrow().clone();
    assert!(!snap.loading);
    assert_eq!(snap.videos.len(), 3);
  }

  #[tokio::test]
  async fn loads_from_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", sample_json()).unwrap();

    let store = VideoStore::new(VideoSource::File { path: file.path().to_path_buf() });
    store.load().await;

    let snap = store.snapshot();
    assert_eq!(snap.videos.len(), 3);
    assert_eq!(snap.videos[2].id, "christmasVid3");
    assert!(snap.error.is_none());
  }

  #[tokio::test]
  async fn missing_file_is_a_transport_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = VideoStore::new(VideoSource::File { path: dir.path().join("videos.json") });
    store.load().await;
    assert!(matches!(store.snapshot().error, Some(LoadError::Transport(_))));
  }
}
