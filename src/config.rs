use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::warn;

/// User preferences persisted to `prefs.toml` in the platform config dir.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub theme_name: Option<String>,
  pub density: Option<String>,
  /// Overrides the compiled-in base URL for `videos.json`.
  pub base_url: Option<String>,
}

pub fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", "vg")
}

impl Config {
  pub fn load() -> Self {
    if let Some(proj_dirs) = project_dirs() {
      let config_file = proj_dirs.config_dir().join("prefs.toml");
      if let Ok(content) = std::fs::read_to_string(&config_file) {
        match toml::from_str(&content) {
          Ok(config) => return config,
          Err(e) => warn!(path = %config_file.display(), err = %e, "config: ignoring malformed prefs"),
        }
      }
    }
    Self::default()
  }

  pub fn save(&self) {
    let Some(proj_dirs) = project_dirs() else { return };
    let config_dir = proj_dirs.config_dir();
    if let Err(e) = self.write_to(config_dir) {
      warn!(dir = %config_dir.display(), err = %e, "config: failed to save prefs");
    }
  }

  /// Write `prefs.toml` into `config_dir`, creating the directory if needed.
  fn write_to(&self, config_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(config_dir)?;
    let content = toml::to_string(self).map_err(io::Error::other)?;
    std::fs::write(config_dir.join("prefs.toml"), content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_through_toml() {
    let config = Config {
      theme_name: Some("Dusk".to_string()),
      density: Some("list".to_string()),
      base_url: Some("https://example.org/gallery".to_string()),
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
  }

  #[test]
  fn missing_keys_default_to_none() {
    let config: Config = toml::from_str("theme_name = \"Paper\"\n").unwrap();
    assert_eq!(config.theme_name.as_deref(), Some("Paper"));
    assert_eq!(config.density, None);
    assert_eq!(config.base_url, None);
  }

  #[test]
  fn writes_prefs_into_missing_dir() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested").join("vg");
    let config = Config { density: Some("medium".to_string()), ..Config::default() };
    config.write_to(&dir).unwrap();
    let text = std::fs::read_to_string(dir.join("prefs.toml")).unwrap();
    assert_eq!(toml::from_str::<Config>(&text).unwrap(), config);
  }

  #[test]
  fn unwritable_dir_is_reported() {
    let file = tempfile::NamedTempFile::new().unwrap();
    // A regular file where the directory should be.
    assert!(Config::default().write_to(file.path()).is_err());
  }
}
