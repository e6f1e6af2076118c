use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::catalog::Video;
use crate::constants::constants;
use crate::error::{ErrorKind, PlayerError};
use crate::input::{COMMANDS, Command, ParseError};
use crate::player::{FlagOutcome, Listing, NowPlaying, PauseOutcome, Played, PlaylistView};
use crate::search::SearchResults;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
  /// Human-readable status lines.
  #[default]
  Text,
  /// One JSON object per command.
  Json,
}

impl OutputMode {
  pub fn from_config(s: &str) -> Self {
    match s.to_lowercase().as_str() {
      "json" => OutputMode::Json,
      _ => OutputMode::Text,
    }
  }
}

/// Success payload of a command, as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
  Count(usize),
  Videos(Vec<Listing>),
  Played(Played),
  Video(Video),
  Pause(PauseOutcome),
  NowPlaying(NowPlaying),
  Name(String),
  Names(Vec<String>),
  Playlist(PlaylistView),
  Search(SearchResults),
  Flagged(FlagOutcome),
  Help(Vec<HelpEntry>),
  Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
  pub usage: &'static str,
  pub description: &'static str,
}

pub fn help_entries() -> Vec<HelpEntry> {
  COMMANDS.iter().map(|&(_, usage, description)| HelpEntry { usage, description }).collect()
}

pub type Outcome = std::result::Result<Detail, PlayerError>;

#[derive(Serialize)]
struct JsonReport<'a> {
  command: &'a str,
  ok: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  detail: Option<&'a Detail>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
  kind: &'static str,
  message: String,
}

/// Render the outcome of `command` as output lines.
pub fn render(mode: OutputMode, command: &Command, outcome: &Outcome) -> Result<Vec<String>> {
  match mode {
    OutputMode::Text => Ok(render_text(command, outcome)),
    OutputMode::Json => {
      let report = match outcome {
        Ok(detail) => JsonReport { command: command.name(), ok: true, detail: Some(detail), error: None },
        Err(e) => JsonReport {
          command: command.name(),
          ok: false,
          detail: None,
          error: Some(JsonError { kind: e.kind().as_str(), message: e.to_string() }),
        },
      };
      Ok(vec![serde_json::to_string(&report)?])
    }
  }
}

/// Render a line that could not be parsed.
pub fn render_parse_error(mode: OutputMode, err: &ParseError) -> Result<Vec<String>> {
  match mode {
    OutputMode::Text => {
      let mut lines = vec![constants().invalid_command.clone()];
      if let ParseError::Usage(_) = err {
        lines.push(format!("  {}", err));
      }
      Ok(lines)
    }
    OutputMode::Json => {
      let report = JsonReport {
        command: "invalid",
        ok: false,
        detail: None,
        error: Some(JsonError { kind: "invalid_command", message: err.to_string() }),
      };
      Ok(vec![serde_json::to_string(&report)?])
    }
  }
}

/// `video` or `video - FLAGGED (reason: ...)`.
pub fn listing_line(listing: &Listing) -> String {
  match &listing.flag {
    Some(reason) => format!("{} - FLAGGED (reason: {})", listing.video, reason),
    None => listing.video.to_string(),
  }
}

fn played_lines(played: &Played) -> Vec<String> {
  let mut lines = Vec::new();
  if let Some(ref stopped) = played.stopped {
    lines.push(format!("Stopping video: {}", stopped.title));
  }
  lines.push(format!("Playing video: {}", played.playing.title));
  lines
}

/// Prefix used when `command` fails, e.g. "Cannot play video".
///
/// `None` means the failure message stands on its own.
fn failure_prefix(command: &Command) -> Option<String> {
  let prefix = match command {
    Command::Play(_) => "Cannot play video".to_string(),
    Command::Stop => "Cannot stop video".to_string(),
    Command::Pause => "Cannot pause video".to_string(),
    Command::Continue => "Cannot continue video".to_string(),
    Command::CreatePlaylist(_) => "Cannot create playlist".to_string(),
    Command::AddToPlaylist { playlist, .. } => format!("Cannot add video to {}", playlist),
    Command::RemoveFromPlaylist { playlist, .. } => format!("Cannot remove video from {}", playlist),
    Command::ClearPlaylist(name) => format!("Cannot clear playlist {}", name),
    Command::DeletePlaylist(name) => format!("Cannot delete playlist {}", name),
    Command::ShowPlaylist(name) => format!("Cannot show playlist {}", name),
    Command::Flag { .. } => "Cannot flag video".to_string(),
    Command::Allow(_) => "Cannot remove flag from video".to_string(),
    _ => return None,
  };
  Some(prefix)
}

fn render_failure(command: &Command, err: &PlayerError) -> Vec<String> {
  match (command, err) {
    (Command::ShowPlaylist(name), PlayerError::EmptyPlaylist { .. }) => {
      vec![format!("Showing playlist: {}", name), err.to_string()]
    }
    (_, err) if err.kind() == ErrorKind::Empty => vec![err.to_string()],
    (Command::ShowPlaying, _) => vec![err.to_string()],
    _ => match failure_prefix(command) {
      Some(prefix) => vec![format!("{}: {}", prefix, err)],
      None => vec![err.to_string()],
    },
  }
}

fn render_success(command: &Command, detail: &Detail) -> Vec<String> {
  match (command, detail) {
    (_, Detail::Count(n)) => vec![format!("{} videos in the library", n)],
    (_, Detail::Videos(videos)) => std::iter::once("Here's a list of all available videos:".to_string())
      .chain(videos.iter().map(listing_line))
      .collect(),
    (_, Detail::Played(played)) => played_lines(played),
    (_, Detail::Pause(PauseOutcome::Paused(v))) => vec![format!("Pausing video: {}", v.title)],
    (_, Detail::Pause(PauseOutcome::AlreadyPaused(v))) => vec![format!("Video already paused: {}", v.title)],
    (_, Detail::NowPlaying(now)) => vec![format!("Currently playing: {} - {}", now.video, now.status)],
    (Command::Stop, Detail::Video(v)) => vec![format!("Stopping video: {}", v.title)],
    (Command::Continue, Detail::Video(v)) => vec![format!("Continuing video: {}", v.title)],
    (Command::AddToPlaylist { playlist, .. }, Detail::Video(v)) => {
      vec![format!("Added video to {}: {}", playlist, v.title)]
    }
    (Command::RemoveFromPlaylist { playlist, .. }, Detail::Video(v)) => {
      vec![format!("Removed video from {}: {}", playlist, v.title)]
    }
    (Command::Allow(_), Detail::Video(v)) => vec![format!("Successfully removed flag from video: {}", v.title)],
    (_, Detail::Video(v)) => vec![v.to_string()],
    (Command::CreatePlaylist(name), Detail::Name(_)) => vec![format!("Successfully created new playlist: {}", name)],
    (Command::ClearPlaylist(name), Detail::Name(_)) => {
      vec![format!("Successfully removed all videos from {}", name)]
    }
    (Command::DeletePlaylist(name), Detail::Name(_)) => vec![format!("Deleted playlist: {}", name)],
    (_, Detail::Name(name)) => vec![name.clone()],
    (_, Detail::Names(names)) => {
      std::iter::once("Showing all playlists:".to_string()).chain(names.iter().cloned()).collect()
    }
    (Command::ShowPlaylist(name), Detail::Playlist(view)) => {
      std::iter::once(format!("Showing playlist: {}", name)).chain(view.videos.iter().map(listing_line)).collect()
    }
    (_, Detail::Playlist(view)) => {
      std::iter::once(format!("Showing playlist: {}", view.name)).chain(view.videos.iter().map(listing_line)).collect()
    }
    (_, Detail::Search(results)) => std::iter::once(format!("Here are the results for {}:", results.term))
      .chain(results.numbered().map(|(n, v)| format!("{}) {}", n, v)))
      .chain(constants().selection_prompt.iter().cloned())
      .collect(),
    (_, Detail::Flagged(outcome)) => {
      let mut lines = Vec::new();
      if let Some(ref stopped) = outcome.stopped {
        lines.push(format!("Stopping video: {}", stopped.title));
      }
      lines.push(format!("Successfully flagged video: {} (reason: {})", outcome.video.title, outcome.reason));
      lines
    }
    (_, Detail::Help(entries)) => std::iter::once("Available commands:".to_string())
      .chain(entries.iter().map(|e| format!("    {:<48} {}", e.usage, e.description)))
      .collect(),
    (_, Detail::Exit) => vec![constants().farewell.clone()],
  }
}

fn render_text(command: &Command, outcome: &Outcome) -> Vec<String> {
  match outcome {
    Ok(detail) => render_success(command, detail),
    Err(err) => render_failure(command, err),
  }
}
