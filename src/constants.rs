//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!`, so the strings are always
//! available without runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// Fixed strings shared by the controller, the renderer and the command loop.
#[derive(Debug, Deserialize)]
pub struct Constants {
  /// Used for the config/data directories.
  pub app_name: String,
  pub log_file: String,

  // Moderation
  pub default_flag_reason: String,

  // Command loop
  pub banner: String,
  pub prompt: String,
  pub farewell: String,
  pub invalid_command: String,
  pub selection_prompt: Vec<String>,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed every test touching it fails.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
