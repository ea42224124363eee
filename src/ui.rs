use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, BorderType, Cell, List, ListItem, Padding, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, AppMode, Density, View};
use crate::constants::constants;
use crate::theme::Theme;
use crate::thumbnail::{ThumbnailWidget, fit_to_area};
use crate::video::Video;

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

fn rounded_block(theme: &Theme) -> Block<'static> {
  Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border))
}

/// `#tag` chips in display order, or `None` when the video has no tags.
pub fn tag_chips(video: &Video) -> Option<String> {
  if video.tags.is_empty() {
    return None;
  }
  Some(video.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "))
}

pub fn views_label(video: &Video) -> String {
  format!("👁 {}", video.view_count)
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, main_area, status_area, footer_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
      .areas(frame.area());

  render_header(frame, app, header_area);
  match app.view {
    View::Gallery => render_gallery(frame, app, main_area),
    View::Admin => render_admin(frame, app, main_area),
    View::Detail { .. } => render_detail(frame, app, main_area),
  }
  render_status(frame, app, status_area);
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let title = match app.view {
    View::Admin => constants().admin_title.as_str(),
    _ => constants().site_title.as_str(),
  };
  let left = Line::from(Span::styled(format!(" ▶ {} ", title), Style::default().fg(theme.accent).bold()));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

/// Message shown in place of content while loading, after a failure, or when empty.
fn placeholder(app: &App, empty_text: &str) -> Option<(String, Style)> {
  let theme = app.theme();
  let snap = &app.snapshot;
  if (snap.loading || app.load_pending) && snap.videos.is_empty() {
    Some(("Loading videos…".to_string(), Style::default().fg(theme.status)))
  } else if snap.error.is_some() {
    Some((snap.error_message(), Style::default().fg(theme.error)))
  } else if !empty_text.is_empty() {
    Some((empty_text.to_string(), Style::default().fg(theme.muted)))
  } else {
    None
  }
}

fn render_centered(frame: &mut Frame, theme: &Theme, area: Rect, text: String, style: Style) {
  let lines = vec![Line::from(""), Line::from(Span::styled(text, style))];
  frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center).block(rounded_block(theme)), area);
}

// --- Gallery ---

fn render_gallery(frame: &mut Frame, app: &mut App, area: Rect) {
  let [sidebar_area, content_area] = Layout::horizontal([Constraint::Length(26), Constraint::Min(20)]).areas(area);
  let [search_area, grid_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(content_area);

  render_sidebar(frame, app, sidebar_area);
  render_search(frame, app, search_area);
  render_grid(frame, app, grid_area);
}

fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode == AppMode::Collections;
  let inner_w = area.width.saturating_sub(6) as usize;

  // "All Videos" is always present; collection rows only when some video has playlists.
  let mut items = vec![sidebar_item(theme, "All Videos", app.collection.is_none(), inner_w)];
  items.extend(app.collections.iter().map(|c| {
    let active = app.collection.as_deref() == Some(c.id.as_str());
    sidebar_item(theme, &c.title, active, inner_w)
  }));

  let border = if focused { theme.accent } else { theme.border };
  let mut list = List::new(items).block(
    Block::bordered()
      .title(" Collections ")
      .title_style(Style::default().fg(border))
      .border_type(BorderType::Rounded)
      .border_style(Style::default().fg(border)),
  );
  if focused {
    list = list.highlight_symbol("▶ ").highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg));
  }
  frame.render_stateful_widget(list, area, &mut app.sidebar_state);
}

fn sidebar_item(theme: &Theme, label: &str, active: bool, width: usize) -> ListItem<'static> {
  let marker = if active { "● " } else { "  " };
  let style = if active { Style::default().fg(theme.accent).bold() } else { Style::default().fg(theme.fg) };
  ListItem::new(Line::from(Span::styled(format!("{}{}", marker, truncate_str(label, width)), style)))
}

fn render_search(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode == AppMode::Search;
  let border_color = if focused { theme.accent } else { theme.border };
  let block = Block::bordered()
    .title(" Search ")
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.query, app.cursor_position);

  if cursor_col < app.input_scroll {
    app.input_scroll = cursor_col;
  } else if cursor_col >= app.input_scroll + inner_w {
    app.input_scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let paragraph = if app.query.is_empty() {
    Paragraph::new(Span::styled(constants().search_placeholder.as_str(), Style::default().fg(theme.muted)))
  } else {
    let visible: String = app
      .query
      .chars()
      .scan(0usize, |col, c| {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        let start = *col;
        *col += w;
        Some((start, *col, c))
      })
      .skip_while(|(_, end, _)| *end <= app.input_scroll)
      .take_while(|(start, _, _)| *start < app.input_scroll + inner_w)
      .map(|(_, _, c)| c)
      .collect();
    Paragraph::new(visible).style(Style::default().fg(theme.fg))
  };
  frame.render_widget(paragraph.block(block), area);

  if focused {
    let cursor_x = area.x + 2 + (cursor_col - app.input_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  if let Some((text, style)) = placeholder(app, "") {
    render_centered(frame, theme, area, text, style);
    return;
  }
  if app.filtered_indices.is_empty() {
    render_centered(frame, theme, area, "No videos found.".to_string(), Style::default().fg(theme.muted));
    return;
  }

  // Inner width: area minus 2 borders minus 2 chars for highlight symbol ("▶ ")
  let inner_w = area.width.saturating_sub(4) as usize;
  let selected = app.list_state.selected();

  let items: Vec<ListItem> = app
    .visible_videos()
    .enumerate()
    .map(|(i, video)| {
      let bg = if Some(i) == selected {
        theme.highlight_bg
      } else if i % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };
      ListItem::new(card_lines(theme, video, app.density, inner_w, Some(i) == selected)).bg(bg)
    })
    .collect();

  let title = format!(" {} — {} of {} ", app.density.title(), app.filtered_indices.len(), app.videos().len());
  let border = if app.mode == AppMode::Browse { theme.accent } else { theme.border };
  let list = List::new(items)
    .block(
      Block::bordered()
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border)),
    )
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// One gallery card. Larger densities add the tag row and a description line.
pub fn card_lines(theme: &Theme, video: &Video, density: Density, width: usize, selected: bool) -> Vec<Line<'static>> {
  let fg = if selected { theme.highlight_fg } else { theme.fg };
  let muted = if selected { theme.highlight_fg } else { theme.muted };
  let meta = format!("{}  {}", views_label(video), video.upload_day());

  if density == Density::List {
    let meta_w = meta.chars().count();
    let title = truncate_str(&video.title, width.saturating_sub(meta_w + 2));
    let gap = width.saturating_sub(title.chars().count() + meta_w);
    return vec![Line::from(vec![
      Span::styled(title, Style::default().fg(fg)),
      Span::raw(" ".repeat(gap)),
      Span::styled(meta, Style::default().fg(muted)),
    ])];
  }

  let mut lines = vec![
    Line::from(Span::styled(truncate_str(&video.title, width), Style::default().fg(fg).bold())),
    Line::from(Span::styled(meta, Style::default().fg(muted))),
  ];
  if let Some(chips) = tag_chips(video) {
    let chip_fg = if selected { theme.highlight_fg } else { theme.chip_fg };
    lines.push(Line::from(Span::styled(truncate_str(&chips, width), Style::default().fg(chip_fg))));
  }
  if density == Density::Large {
    let first_line = video.description.lines().next().unwrap_or("");
    if !first_line.is_empty() {
      lines.push(Line::from(Span::styled(truncate_str(first_line, width), Style::default().fg(muted).italic())));
    }
    lines.push(Line::from(""));
  }
  lines
}

// --- Admin ---

fn render_admin(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  // No table at all when loading failed or is still running.
  if let Some((text, style)) = placeholder(app, "") {
    render_centered(frame, theme, area, text, style);
    return;
  }

  let header = Row::new(["Thumbnail", "Title", "Date", "Status", "Actions"])
    .style(Style::default().fg(theme.accent).bold());

  let rows: Vec<Row> = app
    .videos()
    .iter()
    .enumerate()
    .map(|(i, video)| {
      let thumb = match video.thumbnail() {
        Some(t) => format!("{}×{}", t.width, t.height),
        None => "—".to_string(),
      };
      let status_style =
        if video.is_public() { Style::default().fg(theme.chip_fg) } else { Style::default().fg(theme.status) };
      let bg = if i % 2 == 1 { theme.stripe_bg } else { theme.bg };
      Row::new(vec![
        Cell::from(thumb).style(Style::default().fg(theme.muted)),
        Cell::from(video.title.clone()).style(Style::default().fg(theme.fg)),
        Cell::from(video.upload_day()).style(Style::default().fg(theme.fg)),
        Cell::from(format!("[{}]", video.privacy_status)).style(status_style),
        Cell::from("Edit in Studio").style(Style::default().fg(theme.accent).underlined()),
      ])
      .style(Style::default().bg(bg))
    })
    .collect();

  let table = Table::new(
    rows,
    [Constraint::Length(11), Constraint::Min(20), Constraint::Length(12), Constraint::Length(12), Constraint::Length(16)],
  )
  .header(header)
  .block(
    rounded_block(theme)
      .title(" Admin ")
      .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
  )
  .highlight_symbol("▶ ")
  .row_highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg));

  frame.render_stateful_widget(table, area, &mut app.admin_state);
}

// --- Detail ---

fn render_detail(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();

  let Some(video) = app.detail_video().cloned() else {
    if let Some((text, style)) = placeholder(app, "Video not found.") {
      render_centered(frame, theme, area, text, style);
    }
    return;
  };

  let [thumb_area, info_area] = if app.thumbnail_mode.enabled() {
    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area)
  } else {
    [Rect { width: 0, ..area }, area]
  };

  if app.thumbnail_mode.enabled() {
    render_detail_thumbnail(frame, app, &video, thumb_area);
  }

  let inner_w = info_area.width.saturating_sub(4) as usize;
  let label = |s: &'static str| Span::styled(s, Style::default().fg(theme.muted));
  let value = |s: String| Span::styled(s, Style::default().fg(theme.fg));

  let mut lines = vec![
    Line::from(Span::styled(truncate_str(&video.title, inner_w), Style::default().fg(theme.fg).bold())),
    Line::from(""),
    Line::from(vec![label("Uploaded  "), value(video.upload_day())]),
    Line::from(vec![label("Views     "), value(video.view_count.clone())]),
    Line::from(vec![label("Status    "), value(video.privacy_status.clone())]),
  ];
  if !video.playlists.is_empty() {
    let names = video.playlists.iter().map(|p| p.title.as_str()).collect::<Vec<_>>().join(", ");
    lines.push(Line::from(vec![label("In        "), value(names)]));
  }
  if let Some(chips) = tag_chips(&video) {
    lines.push(Line::from(Span::styled(chips, Style::default().fg(theme.chip_fg))));
  }
  lines.push(Line::from(""));
  lines.extend(video.description.lines().map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.fg)))));
  lines.push(Line::from(""));
  lines.push(Line::from(vec![
    label("Watch on YouTube  "),
    Span::styled(video.url.clone(), Style::default().fg(theme.accent).underlined()),
  ]));

  let block = rounded_block(theme)
    .title(" ← Back to Gallery (Esc) ")
    .title_style(Style::default().fg(theme.muted))
    .padding(Padding::horizontal(1));
  frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), info_area);
}

fn render_detail_thumbnail(frame: &mut Frame, app: &mut App, video: &Video, area: Rect) {
  let theme = app.theme();
  let block = rounded_block(theme).title(" ▶ Play (Enter) ").title_style(Style::default().fg(theme.accent));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let cached = app.thumbs.video_id.as_deref() == Some(video.id.as_str());
  match (&app.thumbs.image, cached) {
    (Some(image), true) => {
      let stale = app.thumbs.resized.as_ref().is_none_or(|(r, _)| *r != inner);
      if stale {
        app.thumbs.resized = Some((inner, fit_to_area(image, inner, app.thumbnail_mode)));
      }
      if let Some((_, ref resized)) = app.thumbs.resized {
        frame.render_widget(ThumbnailWidget { image: resized, mode: app.thumbnail_mode }, inner);
      }
    }
    _ => {
      let text = if app.thumbs.is_pending() { "Loading thumbnail…" } else { "No thumbnail" };
      frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(theme.muted))).alignment(Alignment::Center),
        inner,
      );
    }
  }
}

// --- Status & Footer ---

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(msg) = &app.status_message {
    (format!(" ⏳ {}", msg), Style::default().fg(theme.status))
  } else if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else {
    let count = app.videos().len();
    (format!(" {} videos from {}", count, app.store.source().location()), Style::default().fg(theme.muted))
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn footer_keys(app: &App) -> Vec<(&'static str, &'static str)> {
  match (&app.view, app.mode) {
    (View::Gallery, AppMode::Search) => vec![("Enter", "Results"), ("Tab", "Collections"), ("Esc", "Clear")],
    (View::Gallery, AppMode::Collections) => vec![("Enter", "Filter"), ("j/k", "Navigate"), ("Esc", "Back")],
    (View::Gallery, AppMode::Browse) => vec![
      ("Enter", "Details"),
      ("/", "Search"),
      ("c", "Collections"),
      ("d", app.density.next().title()),
      ("o", "Watch"),
      ("a", "Admin"),
      ("^t", "Theme"),
      ("q", "Quit"),
    ],
    (View::Admin, _) => vec![
      ("Enter", "Details"),
      ("e", "Edit in Studio"),
      ("r", "Refresh Video Data"),
      ("g", "Gallery"),
      ("q", "Quit"),
    ],
    (View::Detail { .. }, _) => {
      vec![("Enter", "Watch on YouTube"), ("e", "Edit in Studio"), ("Esc", "Back to Gallery"), ("q", "Quit")]
    }
  }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let keys = footer_keys(app);

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Config;
  use crate::display::ThumbnailMode;
  use crate::error::LoadError;
  use crate::store::{StoreSnapshot, VideoSource, VideoStore};
  use crate::theme::THEMES;
  use crate::video::tests::sample_videos;
  use ratatui::{Terminal, backend::TestBackend};
  use std::sync::Arc;

  fn app_with(snapshot: StoreSnapshot) -> App {
    let store = VideoStore::new(VideoSource::http("http://127.0.0.1:9"));
    let mut app = App::new(store, ThumbnailMode::Off, &Config::default()).without_persistence();
    app.apply_snapshot(snapshot);
    app
  }

  fn loaded(videos: Vec<Video>) -> StoreSnapshot {
    StoreSnapshot { videos: Arc::from(videos), loading: false, error: None }
  }

  fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
      for x in 0..buffer.area.width {
        out.push_str(buffer[(x, y)].symbol());
      }
      out.push('\n');
    }
    out
  }

  // --- helpers ---

  #[test]
  fn truncate_keeps_short_strings() {
    assert_eq!(truncate_str("Christmas", 20), "Christmas");
    assert_eq!(truncate_str("Christmas Morning", 6), "Chris…");
  }

  #[test]
  fn chips_follow_tag_order() {
    let videos = sample_videos();
    assert_eq!(tag_chips(&videos[0]).as_deref(), Some("#vacation #beach #summer"));
    let mut bare = videos[2].clone();
    bare.tags.clear();
    assert_eq!(tag_chips(&bare), None);
  }

  #[test]
  fn card_without_tags_has_no_chip_row() {
    let theme = &THEMES[0];
    let mut video = sample_videos().remove(2);
    let with_tags = card_lines(theme, &video, Density::Medium, 60, false).len();
    video.tags.clear();
    assert_eq!(card_lines(theme, &video, Density::Medium, 60, false).len(), with_tags - 1);
    assert_eq!(card_lines(theme, &video, Density::List, 60, false).len(), 1);
  }

  // --- full frames ---

  #[test]
  fn gallery_shows_titles_views_and_collections() {
    let mut app = app_with(loaded(sample_videos()));
    let screen = render(&mut app);
    assert!(screen.contains("Hirt Family Gallery"));
    assert!(screen.contains("Family Vacation 2023"));
    assert!(screen.contains("Christmas Morning"));
    assert!(screen.contains("42"));
    assert!(screen.contains("#vacation"));
    assert!(screen.contains("All Videos"));
    assert!(screen.contains("Birthdays"));
    assert!(screen.contains("Vacations"));
  }

  #[test]
  fn gallery_without_playlists_only_offers_all_videos() {
    let mut videos = sample_videos();
    videos.iter_mut().for_each(|v| v.playlists.clear());
    let mut app = app_with(loaded(videos));
    let screen = render(&mut app);
    assert!(screen.contains("All Videos"));
    assert!(!screen.contains("Birthdays"));
  }

  #[test]
  fn gallery_empty_state() {
    let mut app = app_with(loaded(Vec::new()));
    assert!(render(&mut app).contains("No videos found."));
  }

  #[test]
  fn gallery_no_match_state() {
    let mut app = app_with(loaded(sample_videos()));
    app.set_query("xyzzy_nonexistent_query".to_string());
    assert!(render(&mut app).contains("No videos found."));
  }

  #[test]
  fn gallery_error_state() {
    let snapshot = StoreSnapshot { error: Some(LoadError::HttpStatus(500)), ..StoreSnapshot::default() };
    let mut app = app_with(snapshot);
    assert!(render(&mut app).contains("Failed to fetch videos: 500"));
  }

  #[tokio::test]
  async fn first_frames_show_loading_before_the_fetch_settles() {
    let store = VideoStore::new(VideoSource::http("http://127.0.0.1:9"));
    let mut app = App::new(store, ThumbnailMode::Off, &Config::default()).without_persistence();
    app.open_detail("vacationVid1".to_string());
    app.start_loading();
    app.check_pending().await.unwrap();

    let screen = render(&mut app);
    assert!(!screen.contains("Video not found."));
    assert_eq!(screen.matches("Loading videos…").count(), 2); // placeholder plus status line

    app.back();
    let screen = render(&mut app);
    assert!(!screen.contains("No videos found."));
    assert_eq!(screen.matches("Loading videos…").count(), 2);

    app.apply_snapshot(loaded(Vec::new()));
    assert!(!app.load_pending);
    assert!(render(&mut app).contains("No videos found."));
  }

  #[test]
  fn admin_table_lists_every_video() {
    let mut app = app_with(loaded(sample_videos()));
    app.show_admin();
    let screen = render(&mut app);
    for header in ["Thumbnail", "Title", "Date", "Status", "Actions"] {
      assert!(screen.contains(header), "missing column {header}");
    }
    assert_eq!(screen.matches("Edit in Studio").count(), 4); // three rows plus the footer hint
    assert!(screen.contains("[public]"));
    assert!(screen.contains("[unlisted]"));
    assert!(screen.contains("2023-09-20"));
    assert!(screen.contains("Admin - Family Videos"));
  }

  #[test]
  fn admin_hides_table_on_error() {
    let snapshot = StoreSnapshot { error: Some(LoadError::HttpStatus(500)), ..StoreSnapshot::default() };
    let mut app = app_with(snapshot);
    app.show_admin();
    let screen = render(&mut app);
    assert!(screen.contains("Failed to fetch videos"));
    assert!(!screen.contains("Thumbnail"));
  }

  #[test]
  fn detail_shows_video() {
    let mut app = app_with(loaded(sample_videos()));
    app.open_detail("vacationVid1".to_string());
    let screen = render(&mut app);
    assert!(screen.contains("Family Vacation 2023"));
    assert!(screen.contains("Back to Gallery"));
    assert!(screen.contains("Watch on YouTube"));
    assert!(screen.contains("youtube.com/watch?v=vacationVid1"));
  }

  #[test]
  fn detail_not_found() {
    let mut app = app_with(loaded(sample_videos()));
    app.open_detail("nonexistent-id".to_string());
    assert!(render(&mut app).contains("Video not found."));
  }
}
