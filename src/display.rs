use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliThumbnailMode {
  Auto,
  Halfblock,
  Ascii,
  Off,
}

/// How the detail view draws thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailMode {
  Off,
  Ascii,
  HalfBlock,
}

impl ThumbnailMode {
  pub fn label(self) -> &'static str {
    match self {
      ThumbnailMode::Off => "off",
      ThumbnailMode::Ascii => "ascii",
      ThumbnailMode::HalfBlock => "half-block",
    }
  }

  pub fn enabled(self) -> bool {
    self != ThumbnailMode::Off
  }
}

/// Pick half-block rendering on true-color terminals, ASCII otherwise.
pub fn detect_thumbnail_mode() -> ThumbnailMode {
  let colorterm = std::env::var("COLORTERM").unwrap_or_default().to_lowercase();
  if colorterm == "truecolor" || colorterm == "24bit" { ThumbnailMode::HalfBlock } else { ThumbnailMode::Ascii }
}

pub fn resolve_thumbnail_mode(cli: CliThumbnailMode) -> ThumbnailMode {
  match cli {
    CliThumbnailMode::Auto => detect_thumbnail_mode(),
    CliThumbnailMode::Halfblock => ThumbnailMode::HalfBlock,
    CliThumbnailMode::Ascii => ThumbnailMode::Ascii,
    CliThumbnailMode::Off => ThumbnailMode::Off,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_modes_resolve_directly() {
    assert_eq!(resolve_thumbnail_mode(CliThumbnailMode::Off), ThumbnailMode::Off);
    assert_eq!(resolve_thumbnail_mode(CliThumbnailMode::Ascii), ThumbnailMode::Ascii);
    assert_eq!(resolve_thumbnail_mode(CliThumbnailMode::Halfblock), ThumbnailMode::HalfBlock);
    assert!(!ThumbnailMode::Off.enabled());
  }
}
