//! Failures reported by the player. All of them are user-input mistakes and
//! leave the player state untouched.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
  #[error("Video does not exist")]
  VideoNotFound,

  #[error("Playlist does not exist")]
  PlaylistNotFound,

  #[error("Video is currently flagged (reason: {reason})")]
  Flagged { reason: String },

  #[error("A playlist with the same name already exists")]
  PlaylistExists,

  #[error("Video already added")]
  AlreadyInPlaylist,

  #[error("Video is not in playlist")]
  NotInPlaylist,

  #[error("Video is already flagged")]
  AlreadyFlagged,

  #[error("Video is not flagged")]
  NotFlagged,

  #[error("No video is currently playing")]
  NoActiveVideo,

  #[error("Video is not paused")]
  NotPaused,

  #[error("No videos available")]
  NoVideosAvailable,

  #[error("No playlists exist yet")]
  NoPlaylists,

  /// Carries the playlist's display name so the listing header can still be shown.
  #[error("No videos here yet")]
  EmptyPlaylist { name: String },

  #[error("No search results for {term}")]
  NoResults { term: String },
}

/// Coarse classification of [`PlayerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Duplicate,
  Flagged,
  StateConflict,
  Empty,
}

impl ErrorKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ErrorKind::NotFound => "not_found",
      ErrorKind::Duplicate => "duplicate",
      ErrorKind::Flagged => "flagged",
      ErrorKind::StateConflict => "state_conflict",
      ErrorKind::Empty => "empty",
    }
  }
}

impl PlayerError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      PlayerError::VideoNotFound | PlayerError::PlaylistNotFound => ErrorKind::NotFound,
      PlayerError::PlaylistExists | PlayerError::AlreadyInPlaylist | PlayerError::AlreadyFlagged => {
        ErrorKind::Duplicate
      }
      PlayerError::Flagged { .. } => ErrorKind::Flagged,
      PlayerError::NotInPlaylist | PlayerError::NotFlagged | PlayerError::NoActiveVideo | PlayerError::NotPaused => {
        ErrorKind::StateConflict
      }
      PlayerError::NoVideosAvailable
      | PlayerError::NoPlaylists
      | PlayerError::EmptyPlaylist { .. }
      | PlayerError::NoResults { .. } => ErrorKind::Empty,
    }
  }
}

pub type PlayerResult<T> = std::result::Result<T, PlayerError>;
