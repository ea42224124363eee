mod app;
mod config;
mod constants;
mod display;
mod error;
mod filter;
mod input;
mod logging;
mod store;
mod theme;
mod thumbnail;
mod ui;
mod video;

use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use app::App;
use config::Config;
use constants::constants;
use display::{CliThumbnailMode, resolve_thumbnail_mode};
use store::{VideoSource, VideoStore};

// --- CLI ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartView {
  Gallery,
  Admin,
}

#[derive(Parser, Debug)]
#[command(name = "vg", author, version = env!("CARGO_PKG_VERSION"), about = "Browse the family video gallery in the terminal", long_about = None)]
struct Args {
  /// Base URL serving videos.json (default: prefs.toml, then the built-in URL)
  #[arg(short, long, conflicts_with = "file")]
  base_url: Option<String>,

  /// Read videos.json from a local file instead of over HTTP
  #[arg(short, long)]
  file: Option<PathBuf>,

  /// Thumbnail rendering: 'auto', 'halfblock', 'ascii', or 'off'
  #[arg(short, long, default_value = "auto")]
  thumbnails: CliThumbnailMode,

  /// Screen to start on
  #[arg(long, default_value = "gallery")]
  view: StartView,

  /// Open the detail view for this video id
  #[arg(long)]
  video: Option<String>,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<clap_complete::Shell>,
}

/// CLI flags win over prefs, prefs over the compiled-in default.
fn resolve_source(args: &Args, config: &Config) -> VideoSource {
  if let Some(ref path) = args.file {
    return VideoSource::File { path: path.clone() };
  }
  let base_url = args
    .base_url
    .clone()
    .or_else(|| config.base_url.clone())
    .unwrap_or_else(|| constants().default_base_url.clone());
  VideoSource::http(base_url)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), "vg", &mut std::io::stdout());
    return Ok(());
  }

  let _log_guard = logging::init().unwrap_or_else(|e| {
    eprintln!("warning: logging disabled: {:#}", e);
    None
  });

  let config = Config::load();
  let source = resolve_source(&args, &config);
  info!(source = %source.location(), version = env!("CARGO_PKG_VERSION"), "starting");

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, args, config, source).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, args: Args, config: Config, source: VideoSource) -> Result<()> {
  let thumbnail_mode = resolve_thumbnail_mode(args.thumbnails);
  info!(mode = thumbnail_mode.label(), "thumbnail mode");

  // One store for the whole session.
  let store = VideoStore::new(source);
  let mut app = App::new(store, thumbnail_mode, &config);
  if args.view == StartView::Admin {
    app.show_admin();
  }
  if let Some(id) = args.video {
    app.open_detail(id);
  }
  app.start_loading();

  loop {
    app.check_pending().await?;
    app.expire_error();

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key).await?;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  info!("exiting");
  Ok(())
}
