use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::constants;

/// Optional `config.toml` in the platform config directory.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
pub struct Config {
  /// Catalog file to load instead of the embedded library.
  pub catalog: Option<PathBuf>,
  /// `text` or `json`.
  pub output: Option<String>,
  /// `EnvFilter` directive used when `RUST_LOG` is unset.
  pub log_filter: Option<String>,
}

impl Config {
  pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", &constants().app_name)
  }

  /// Missing or malformed files fall back to defaults.
  pub fn load() -> Self {
    if let Some(proj_dirs) = Self::project_dirs()
      && let Ok(content) = std::fs::read_to_string(proj_dirs.config_dir().join("config.toml"))
    {
      return Self::parse(&content);
    }
    Self::default()
  }

  pub fn parse(content: &str) -> Self {
    toml::from_str(content).unwrap_or_default()
  }
}
