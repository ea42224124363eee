use anyhow::Result;
use ratatui::crossterm::event::{self, KeyCode, KeyModifiers};

use crate::app::{App, AppMode, View, step_selection};
use crate::constants::constants;

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Event Handling ---

pub async fn handle_key_event(app: &mut App, key: event::KeyEvent) -> Result<()> {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return Ok(());
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return Ok(());
  }

  match app.view {
    View::Gallery => match app.mode {
      AppMode::Search => handle_search_key(app, key),
      AppMode::Browse => handle_browse_key(app, key),
      AppMode::Collections => handle_collections_key(app, key),
    },
    View::Admin => handle_admin_key(app, key),
    View::Detail { .. } => handle_detail_key(app, key),
  }
  Ok(())
}

fn handle_search_key(app: &mut App, key: event::KeyEvent) {
  app.clear_error();
  match key.code {
    KeyCode::Char(c) => {
      let byte_idx = char_to_byte_index(&app.query, app.cursor_position);
      app.query.insert(byte_idx, c);
      app.cursor_position += 1;
      app.recompute_filter();
    }
    KeyCode::Backspace => {
      if app.cursor_position > 0 {
        app.cursor_position -= 1;
        let byte_idx = char_to_byte_index(&app.query, app.cursor_position);
        app.query.remove(byte_idx);
        app.recompute_filter();
      }
    }
    KeyCode::Delete => {
      if app.cursor_position < app.query.chars().count() {
        let byte_idx = char_to_byte_index(&app.query, app.cursor_position);
        app.query.remove(byte_idx);
        app.recompute_filter();
      }
    }
    KeyCode::Left => {
      app.cursor_position = app.cursor_position.saturating_sub(1);
    }
    KeyCode::Right => {
      if app.cursor_position < app.query.chars().count() {
        app.cursor_position += 1;
      }
    }
    KeyCode::Home => {
      app.cursor_position = 0;
    }
    KeyCode::End => {
      app.cursor_position = app.query.chars().count();
    }
    KeyCode::Esc => {
      if !app.query.is_empty() {
        app.input_scroll = 0;
        app.set_query(String::new());
      } else {
        app.mode = AppMode::Browse;
      }
    }
    KeyCode::Enter | KeyCode::Down => {
      app.mode = AppMode::Browse;
    }
    KeyCode::Tab => {
      app.mode = AppMode::Collections;
    }
    _ => {}
  }
}

fn handle_browse_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter => app.open_selected(),
    KeyCode::Down | KeyCode::Char('j') => {
      let next = step_selection(app.list_state.selected(), app.filtered_indices.len(), true);
      app.list_state.select(next);
    }
    KeyCode::Up | KeyCode::Char('k') => {
      let next = step_selection(app.list_state.selected(), app.filtered_indices.len(), false);
      app.list_state.select(next);
    }
    KeyCode::Char('/') => app.mode = AppMode::Search,
    KeyCode::Tab | KeyCode::Char('c') => app.mode = AppMode::Collections,
    KeyCode::Char('d') => app.next_density(),
    KeyCode::Char('a') => app.show_admin(),
    KeyCode::Char('o') => {
      if let Some(url) = app.selected_video().map(|v| v.url.clone()) {
        app.open_url(&url);
      }
    }
    KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn handle_collections_key(app: &mut App, key: event::KeyEvent) {
  // "All Videos" plus one row per collection.
  let rows = app.collections.len() + 1;
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => {
      let next = step_selection(app.sidebar_state.selected(), rows, true);
      app.sidebar_state.select(next);
    }
    KeyCode::Up | KeyCode::Char('k') => {
      let next = step_selection(app.sidebar_state.selected(), rows, false);
      app.sidebar_state.select(next);
    }
    KeyCode::Enter | KeyCode::Char(' ') => app.activate_sidebar(),
    KeyCode::Char('/') => app.mode = AppMode::Search,
    KeyCode::Esc | KeyCode::Tab | KeyCode::Right => app.mode = AppMode::Browse,
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn handle_admin_key(app: &mut App, key: event::KeyEvent) {
  let count = app.videos().len();
  match key.code {
    KeyCode::Down | KeyCode::Char('j') => {
      let next = step_selection(app.admin_state.selected(), count, true);
      app.admin_state.select(next);
    }
    KeyCode::Up | KeyCode::Char('k') => {
      let next = step_selection(app.admin_state.selected(), count, false);
      app.admin_state.select(next);
    }
    KeyCode::Enter => app.open_selected(),
    KeyCode::Char('e') => {
      if let Some(url) = app.selected_admin_video().map(|v| v.studio_url()) {
        app.open_url(&url);
      }
    }
    KeyCode::Char('r') => app.open_url(&constants().refresh_workflow_url),
    KeyCode::Char('g') | KeyCode::Esc => app.show_gallery(),
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn handle_detail_key(app: &mut App, key: event::KeyEvent) {
  match key.code {
    KeyCode::Enter | KeyCode::Char('o') => {
      if let Some(url) = app.detail_video().map(|v| v.url.clone()) {
        app.open_url(&url);
      }
    }
    KeyCode::Char('e') => {
      if let Some(url) = app.detail_video().map(|v| v.studio_url()) {
        app.open_url(&url);
      }
    }
    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back(),
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}
