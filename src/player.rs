use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::info;

use crate::catalog::{Video, VideoCatalog, VideoId, VideoLibrary};
use crate::constants::constants;
use crate::error::{PlayerError, PlayerResult};
use crate::playlist::PlaylistRegistry;
use crate::search::{SearchMode, SearchResults};

/// Reportable projection of [`PlaybackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayStatus {
  Stopped,
  Playing,
  Paused,
}

impl fmt::Display for PlayStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      PlayStatus::Stopped => "STOPPED",
      PlayStatus::Playing => "PLAYING",
      PlayStatus::Paused => "PAUSED",
    })
  }
}

/// Playback state machine. A current video exists exactly when not stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
  #[default]
  Stopped,
  Playing(VideoId),
  Paused(VideoId),
}

impl PlaybackState {
  pub fn status(&self) -> PlayStatus {
    match self {
      PlaybackState::Stopped => PlayStatus::Stopped,
      PlaybackState::Playing(_) => PlayStatus::Playing,
      PlaybackState::Paused(_) => PlayStatus::Paused,
    }
  }

  pub fn current(&self) -> Option<&str> {
    match self {
      PlaybackState::Stopped => None,
      PlaybackState::Playing(id) | PlaybackState::Paused(id) => Some(id.as_str()),
    }
  }
}

// --- Outcomes ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Played {
  /// Video that was implicitly stopped to make room, if any.
  pub stopped: Option<Video>,
  pub playing: Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "video", rename_all = "snake_case")]
pub enum PauseOutcome {
  Paused(Video),
  AlreadyPaused(Video),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlaying {
  pub video: Video,
  pub status: PlayStatus,
}

/// A video as shown in a listing, annotated with its flag reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
  pub video: Video,
  pub flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistView {
  pub name: String,
  pub videos: Vec<Listing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagOutcome {
  pub video: Video,
  pub reason: String,
  /// Set when the flagged video was the current one.
  pub stopped: Option<Video>,
}

// --- Controller ---

/// Owns playback, playlists and flags, and enforces the rules between them.
pub struct VideoPlayer<C = VideoLibrary> {
  catalog: C,
  playback: PlaybackState,
  playlists: PlaylistRegistry,
  /// video id -> reason
  flags: HashMap<VideoId, String>,
}

impl<C: VideoCatalog> VideoPlayer<C> {
  pub fn new(catalog: C) -> Self {
    Self { catalog, playback: PlaybackState::Stopped, playlists: PlaylistRegistry::default(), flags: HashMap::new() }
  }

  pub fn playback(&self) -> &PlaybackState {
    &self.playback
  }

  pub fn flag_reason(&self, id: &str) -> Option<&str> {
    self.flags.get(id).map(String::as_str)
  }

  fn lookup(&self, id: &str) -> PlayerResult<Video> {
    self.catalog.video(id).cloned().ok_or(PlayerError::VideoNotFound)
  }

  fn ensure_not_flagged(&self, id: &str) -> PlayerResult<()> {
    match self.flags.get(id) {
      Some(reason) => Err(PlayerError::Flagged { reason: reason.clone() }),
      None => Ok(()),
    }
  }

  fn listing(&self, video: &Video) -> Listing {
    Listing { video: video.clone(), flag: self.flag_reason(&video.id).map(str::to_string) }
  }

  fn current_video(&self) -> Option<Video> {
    self.playback.current().and_then(|id| self.catalog.video(id)).cloned()
  }

  /// Catalog videos sorted by title, case-insensitively.
  fn videos_by_title(&self) -> Vec<&Video> {
    let mut videos = self.catalog.videos();
    videos.sort_by_cached_key(|v| v.title.to_lowercase());
    videos
  }

  /// Clears playback, returning the video that was current.
  fn halt(&mut self) -> Option<Video> {
    let video = self.current_video();
    self.playback = PlaybackState::Stopped;
    if let Some(ref v) = video {
      info!(video = %v.id, "playback: stopped");
    }
    video
  }

  // --- Library ---

  pub fn count_videos(&self) -> usize {
    self.catalog.videos().len()
  }

  /// Every video by title, flagged ones included and annotated.
  pub fn list_all_videos(&self) -> Vec<Listing> {
    self.videos_by_title().into_iter().map(|v| self.listing(v)).collect()
  }

  // --- Playback ---

  pub fn play(&mut self, id: &str) -> PlayerResult<Played> {
    let video = self.lookup(id)?;
    self.ensure_not_flagged(id)?;
    let stopped = self.halt();
    self.playback = PlaybackState::Playing(video.id.clone());
    info!(video = %video.id, "playback: playing");
    Ok(Played { stopped, playing: video })
  }

  pub fn stop(&mut self) -> PlayerResult<Video> {
    self.halt().ok_or(PlayerError::NoActiveVideo)
  }

  pub fn play_random(&mut self) -> PlayerResult<Played> {
    self.play_random_with(&mut rand::thread_rng())
  }

  /// Picks uniformly among unflagged videos.
  pub fn play_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PlayerResult<Played> {
    let eligible: Vec<&Video> = self.catalog.videos().into_iter().filter(|v| !self.flags.contains_key(&v.id)).collect();
    let id = eligible.choose(rng).map(|v| v.id.clone()).ok_or(PlayerError::NoVideosAvailable)?;
    self.play(&id)
  }

  pub fn pause(&mut self) -> PlayerResult<PauseOutcome> {
    let video = self.current_video().ok_or(PlayerError::NoActiveVideo)?;
    match self.playback {
      PlaybackState::Paused(_) => Ok(PauseOutcome::AlreadyPaused(video)),
      _ => {
        self.playback = PlaybackState::Paused(video.id.clone());
        info!(video = %video.id, "playback: paused");
        Ok(PauseOutcome::Paused(video))
      }
    }
  }

  pub fn resume(&mut self) -> PlayerResult<Video> {
    let video = self.current_video().ok_or(PlayerError::NoActiveVideo)?;
    match self.playback {
      PlaybackState::Paused(_) => {
        self.playback = PlaybackState::Playing(video.id.clone());
        info!(video = %video.id, "playback: resumed");
        Ok(video)
      }
      _ => Err(PlayerError::NotPaused),
    }
  }

  pub fn show_current(&self) -> PlayerResult<NowPlaying> {
    let video = self.current_video().ok_or(PlayerError::NoActiveVideo)?;
    Ok(NowPlaying { video, status: self.playback.status() })
  }

  // --- Playlists ---

  /// Returns the name as it will be displayed.
  pub fn create_playlist(&mut self, name: &str) -> PlayerResult<String> {
    if !self.playlists.create(name) {
      return Err(PlayerError::PlaylistExists);
    }
    info!(playlist = name, "playlist: created");
    Ok(name.to_string())
  }

  pub fn add_to_playlist(&mut self, name: &str, id: &str) -> PlayerResult<Video> {
    let playlist = self.playlists.get_mut(name).ok_or(PlayerError::PlaylistNotFound)?;
    let video = self.catalog.video(id).cloned().ok_or(PlayerError::VideoNotFound)?;
    // A duplicate is reported ahead of the flag.
    if let Some(reason) = self.flags.get(id)
      && !playlist.contains(id)
    {
      return Err(PlayerError::Flagged { reason: reason.clone() });
    }
    if !playlist.push(video.id.clone()) {
      return Err(PlayerError::AlreadyInPlaylist);
    }
    info!(playlist = name, video = %video.id, size = playlist.len(), "playlist: video added");
    Ok(video)
  }

  pub fn show_all_playlists(&self) -> PlayerResult<Vec<String>> {
    if self.playlists.is_empty() {
      return Err(PlayerError::NoPlaylists);
    }
    Ok(self.playlists.names().into_iter().map(str::to_string).collect())
  }

  pub fn show_playlist(&self, name: &str) -> PlayerResult<PlaylistView> {
    let playlist = self.playlists.get(name).ok_or(PlayerError::PlaylistNotFound)?;
    if playlist.is_empty() {
      return Err(PlayerError::EmptyPlaylist { name: playlist.name.clone() });
    }
    let videos = playlist.iter().filter_map(|id| self.catalog.video(id)).map(|v| self.listing(v)).collect();
    Ok(PlaylistView { name: playlist.name.clone(), videos })
  }

  pub fn remove_from_playlist(&mut self, name: &str, id: &str) -> PlayerResult<Video> {
    if !self.playlists.contains(name) {
      return Err(PlayerError::PlaylistNotFound);
    }
    let video = self.lookup(id)?;
    let removed = self.playlists.get_mut(name).is_some_and(|p| p.remove(id));
    if !removed {
      return Err(PlayerError::NotInPlaylist);
    }
    info!(playlist = name, video = %video.id, "playlist: video removed");
    Ok(video)
  }

  pub fn clear_playlist(&mut self, name: &str) -> PlayerResult<String> {
    let playlist = self.playlists.get_mut(name).ok_or(PlayerError::PlaylistNotFound)?;
    playlist.clear();
    info!(playlist = name, "playlist: cleared");
    Ok(playlist.name.clone())
  }

  pub fn delete_playlist(&mut self, name: &str) -> PlayerResult<String> {
    let playlist = self.playlists.delete(name).ok_or(PlayerError::PlaylistNotFound)?;
    info!(playlist = name, "playlist: deleted");
    Ok(playlist.name)
  }

  // --- Search ---

  /// Unflagged videos matching `term`, ordered by title.
  pub fn search(&self, term: &str, mode: SearchMode) -> PlayerResult<SearchResults> {
    let videos: Vec<Video> = self
      .videos_by_title()
      .into_iter()
      .filter(|v| !self.flags.contains_key(&v.id) && mode.matches(v, term))
      .cloned()
      .collect();
    if videos.is_empty() {
      return Err(PlayerError::NoResults { term: term.to_string() });
    }
    Ok(SearchResults { term: term.to_string(), videos })
  }

  pub fn search_by_title(&self, term: &str) -> PlayerResult<SearchResults> {
    self.search(term, SearchMode::Title)
  }

  pub fn search_by_tag(&self, tag: &str) -> PlayerResult<SearchResults> {
    self.search(tag, SearchMode::Tag)
  }

  // --- Moderation ---

  /// Flags a video. Falls back to the default reason when `reason` is `None`.
  pub fn flag(&mut self, id: &str, reason: Option<&str>) -> PlayerResult<FlagOutcome> {
    let video = self.lookup(id)?;
    if self.flags.contains_key(id) {
      return Err(PlayerError::AlreadyFlagged);
    }
    let reason = reason.map_or_else(|| constants().default_flag_reason.clone(), str::to_string);
    self.flags.insert(video.id.clone(), reason.clone());
    let stopped = if self.playback.current() == Some(id) { self.halt() } else { None };
    info!(video = %video.id, reason = %reason, "moderation: flagged");
    Ok(FlagOutcome { video, reason, stopped })
  }

  pub fn unflag(&mut self, id: &str) -> PlayerResult<Video> {
    let video = self.lookup(id)?;
    if self.flags.remove(id).is_none() {
      return Err(PlayerError::NotFlagged);
    }
    info!(video = %video.id, "moderation: flag removed");
    Ok(video)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn two_videos() -> VideoPlayer {
    let lib = VideoLibrary::from_videos(vec![Video::new("v1", "Amy", ["fun"]), Video::new("v2", "Bob", ["drama"])])
      .expect("valid library");
    VideoPlayer::new(lib)
  }

  fn embedded() -> VideoPlayer {
    VideoPlayer::new(VideoLibrary::embedded().expect("embedded library"))
  }

  // --- Playback ---

  #[test]
  fn scenario_flag_then_play_pause_resume_stop() {
    let mut p = two_videos();
    p.flag("v2", Some("spam")).unwrap();
    assert_eq!(p.play("v2"), Err(PlayerError::Flagged { reason: "spam".to_string() }));

    let played = p.play("v1").unwrap();
    assert_eq!(played.playing.id, "v1");
    assert!(played.stopped.is_none());
    assert_eq!(p.playback(), &PlaybackState::Playing("v1".to_string()));

    assert!(matches!(p.pause(), Ok(PauseOutcome::Paused(_))));
    assert_eq!(p.playback().status(), PlayStatus::Paused);

    assert_eq!(p.resume().unwrap().id, "v1");
    assert_eq!(p.playback().status(), PlayStatus::Playing);

    assert_eq!(p.stop().unwrap().id, "v1");
    assert_eq!(p.playback(), &PlaybackState::Stopped);
    assert!(p.playback().current().is_none());
  }

  #[test]
  fn play_unknown_video_leaves_state() {
    let mut p = two_videos();
    p.play("v1").unwrap();
    assert_eq!(p.play("nope"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.playback(), &PlaybackState::Playing("v1".to_string()));
  }

  #[test]
  fn play_while_playing_stops_previous() {
    let mut p = two_videos();
    p.play("v1").unwrap();
    p.pause().unwrap();
    let played = p.play("v2").unwrap();
    assert_eq!(played.stopped.map(|v| v.id), Some("v1".to_string()));
    assert_eq!(p.playback(), &PlaybackState::Playing("v2".to_string()));
  }

  #[test]
  fn flagged_play_does_not_stop_current() {
    let mut p = two_videos();
    p.play("v1").unwrap();
    p.flag("v2", None).unwrap();
    assert!(matches!(p.play("v2"), Err(PlayerError::Flagged { .. })));
    assert_eq!(p.playback().current(), Some("v1"));
  }

  #[test]
  fn stop_when_stopped_is_rejected() {
    let mut p = two_videos();
    assert_eq!(p.stop(), Err(PlayerError::NoActiveVideo));
  }

  #[test]
  fn pause_twice_reports_already_paused() {
    let mut p = two_videos();
    assert_eq!(p.pause(), Err(PlayerError::NoActiveVideo));
    p.play("v1").unwrap();
    p.pause().unwrap();
    assert!(matches!(p.pause(), Ok(PauseOutcome::AlreadyPaused(v)) if v.id == "v1"));
    assert_eq!(p.playback().status(), PlayStatus::Paused);
  }

  #[test]
  fn resume_requires_paused() {
    let mut p = two_videos();
    assert_eq!(p.resume(), Err(PlayerError::NoActiveVideo));
    p.play("v1").unwrap();
    assert_eq!(p.resume(), Err(PlayerError::NotPaused));
  }

  #[test]
  fn show_current_reports_status() {
    let mut p = two_videos();
    assert_eq!(p.show_current(), Err(PlayerError::NoActiveVideo));
    p.play("v2").unwrap();
    p.pause().unwrap();
    let now = p.show_current().unwrap();
    assert_eq!(now.video.id, "v2");
    assert_eq!(now.status, PlayStatus::Paused);
  }

  // --- Random ---

  #[test]
  fn random_never_picks_flagged() {
    let mut p = two_videos();
    p.flag("v2", None).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      assert_eq!(p.play_random_with(&mut rng).unwrap().playing.id, "v1");
    }
  }

  #[test]
  fn random_with_everything_flagged() {
    let mut p = two_videos();
    p.flag("v1", None).unwrap();
    p.flag("v2", None).unwrap();
    assert_eq!(p.play_random(), Err(PlayerError::NoVideosAvailable));
    assert_eq!(p.playback(), &PlaybackState::Stopped);
  }

  #[test]
  fn random_reaches_every_eligible_video() {
    let mut p = embedded();
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
      seen.insert(p.play_random_with(&mut rng).unwrap().playing.id);
    }
    assert_eq!(seen.len(), 5);
  }

  // --- Playlists ---

  #[test]
  fn create_playlist_is_case_insensitive() {
    let mut p = two_videos();
    assert_eq!(p.create_playlist("Foo").unwrap(), "Foo");
    assert_eq!(p.create_playlist("foo"), Err(PlayerError::PlaylistExists));
  }

  #[test]
  fn add_twice_is_rejected_and_count_unchanged() {
    let mut p = two_videos();
    p.create_playlist("Mix").unwrap();
    p.add_to_playlist("mix", "v1").unwrap();
    assert_eq!(p.add_to_playlist("MIX", "v1"), Err(PlayerError::AlreadyInPlaylist));
    assert_eq!(p.show_playlist("Mix").unwrap().videos.len(), 1);
  }

  #[test]
  fn add_checks_in_precedence_order() {
    let mut p = two_videos();
    assert_eq!(p.add_to_playlist("none", "nope"), Err(PlayerError::PlaylistNotFound));
    p.create_playlist("Mix").unwrap();
    assert_eq!(p.add_to_playlist("Mix", "nope"), Err(PlayerError::VideoNotFound));
    p.add_to_playlist("Mix", "v1").unwrap();
    p.flag("v1", Some("old")).unwrap();
    // Already in the playlist wins over flagged.
    assert_eq!(p.add_to_playlist("Mix", "v1"), Err(PlayerError::AlreadyInPlaylist));
    p.flag("v2", Some("spam")).unwrap();
    assert_eq!(p.add_to_playlist("Mix", "v2"), Err(PlayerError::Flagged { reason: "spam".to_string() }));
    let view = p.show_playlist("Mix").unwrap();
    let members: Vec<&str> = view.videos.iter().map(|l| l.video.id.as_str()).collect();
    assert_eq!(members, vec!["v1"]);
  }

  #[test]
  fn remove_leaves_empty_playlist() {
    let mut p = two_videos();
    p.create_playlist("X").unwrap();
    p.add_to_playlist("X", "v1").unwrap();
    assert_eq!(p.remove_from_playlist("x", "v1").unwrap().id, "v1");
    assert_eq!(p.show_playlist("X"), Err(PlayerError::EmptyPlaylist { name: "X".to_string() }));
    assert_eq!(p.show_all_playlists().unwrap(), vec!["X"]);
  }

  #[test]
  fn remove_checks_in_precedence_order() {
    let mut p = two_videos();
    assert_eq!(p.remove_from_playlist("X", "nope"), Err(PlayerError::PlaylistNotFound));
    p.create_playlist("X").unwrap();
    assert_eq!(p.remove_from_playlist("X", "nope"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.remove_from_playlist("X", "v2"), Err(PlayerError::NotInPlaylist));
  }

  #[test]
  fn show_playlist_keeps_order_and_annotates_flags() {
    let mut p = two_videos();
    p.create_playlist("Mix").unwrap();
    p.add_to_playlist("Mix", "v2").unwrap();
    p.add_to_playlist("Mix", "v1").unwrap();
    p.flag("v2", Some("spam")).unwrap();
    let view = p.show_playlist("mix").unwrap();
    assert_eq!(view.name, "Mix");
    let ids: Vec<&str> = view.videos.iter().map(|l| l.video.id.as_str()).collect();
    assert_eq!(ids, vec!["v2", "v1"]);
    assert_eq!(view.videos[0].flag.as_deref(), Some("spam"));
    assert_eq!(view.videos[1].flag, None);
  }

  #[test]
  fn clear_and_delete() {
    let mut p = two_videos();
    assert_eq!(p.clear_playlist("X"), Err(PlayerError::PlaylistNotFound));
    assert_eq!(p.delete_playlist("X"), Err(PlayerError::PlaylistNotFound));
    p.create_playlist("X").unwrap();
    p.add_to_playlist("X", "v1").unwrap();
    assert_eq!(p.clear_playlist("x").unwrap(), "X");
    assert!(matches!(p.show_playlist("X"), Err(PlayerError::EmptyPlaylist { .. })));
    assert_eq!(p.delete_playlist("x").unwrap(), "X");
    assert_eq!(p.show_playlist("X"), Err(PlayerError::PlaylistNotFound));
    assert_eq!(p.show_all_playlists(), Err(PlayerError::NoPlaylists));
  }

  // --- Search ---

  #[test]
  fn search_title_scenario() {
    let mut p = two_videos();
    p.flag("v2", Some("spam")).unwrap();
    let results = p.search_by_title("a").unwrap();
    let titles: Vec<&str> = results.videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Amy"]);
    assert_eq!(p.search_by_tag("drama"), Err(PlayerError::NoResults { term: "drama".to_string() }));
  }

  #[test]
  fn search_sorts_by_title() {
    let p = embedded();
    let results = p.search_by_tag("#ANIMAL").unwrap();
    let titles: Vec<&str> = results.videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Amazing Cats", "Another Cat Video", "Funny Dogs"]);
  }

  #[test]
  fn tag_search_is_not_substring() {
    let p = embedded();
    assert!(p.search_by_tag("#ani").is_err());
    assert!(p.search_by_title("#ani").is_ok());
  }

  // --- Moderation ---

  #[test]
  fn flag_current_video_stops_playback() {
    let mut p = two_videos();
    p.play("v1").unwrap();
    let outcome = p.flag("v1", None).unwrap();
    assert_eq!(outcome.reason, "Not supplied");
    assert_eq!(outcome.stopped.map(|v| v.id), Some("v1".to_string()));
    assert_eq!(p.playback(), &PlaybackState::Stopped);
  }

  #[test]
  fn flag_other_video_keeps_playback() {
    let mut p = two_videos();
    p.play("v1").unwrap();
    assert!(p.flag("v2", Some("x")).unwrap().stopped.is_none());
    assert_eq!(p.playback().current(), Some("v1"));
  }

  #[test]
  fn flag_twice_keeps_first_reason() {
    let mut p = two_videos();
    p.flag("v1", Some("first")).unwrap();
    assert_eq!(p.flag("v1", Some("second")), Err(PlayerError::AlreadyFlagged));
    assert_eq!(p.flag_reason("v1"), Some("first"));
  }

  #[test]
  fn unflag_restores_playback() {
    let mut p = two_videos();
    assert_eq!(p.unflag("nope"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.unflag("v1"), Err(PlayerError::NotFlagged));
    p.flag("v1", None).unwrap();
    p.unflag("v1").unwrap();
    assert!(p.play("v1").is_ok());
  }

  #[test]
  fn unknown_ids_never_change_state() {
    let mut p = two_videos();
    p.create_playlist("Mix").unwrap();
    assert_eq!(p.play("x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.flag("x", None), Err(PlayerError::VideoNotFound));
    assert_eq!(p.unflag("x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.add_to_playlist("Mix", "x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.remove_from_playlist("Mix", "x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.playback(), &PlaybackState::Stopped);
    assert!(p.flag_reason("x").is_none());
    assert!(matches!(p.show_playlist("Mix"), Err(PlayerError::EmptyPlaylist { .. })));
  }

  #[test]
  fn unknown_ids_leave_busy_state_intact() {
    let mut p = two_videos();
    p.create_playlist("Mix").unwrap();
    p.add_to_playlist("Mix", "v1").unwrap();
    p.add_to_playlist("Mix", "v2").unwrap();
    p.flag("v2", Some("spam")).unwrap();
    p.play("v1").unwrap();

    assert_eq!(p.play("x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.flag("x", Some("other")), Err(PlayerError::VideoNotFound));
    assert_eq!(p.unflag("x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.add_to_playlist("Mix", "x"), Err(PlayerError::VideoNotFound));
    assert_eq!(p.remove_from_playlist("Mix", "x"), Err(PlayerError::VideoNotFound));

    assert_eq!(p.playback(), &PlaybackState::Playing("v1".to_string()));
    assert_eq!(p.flag_reason("v2"), Some("spam"));
    assert!(p.flag_reason("x").is_none());
    let view = p.show_playlist("Mix").unwrap();
    let members: Vec<(&str, Option<&str>)> =
      view.videos.iter().map(|l| (l.video.id.as_str(), l.flag.as_deref())).collect();
    assert_eq!(members, vec![("v1", None), ("v2", Some("spam"))]);
  }

  // --- Library ---

  #[test]
  fn list_all_sorted_and_annotated() {
    let mut p = embedded();
    p.flag("funny_dogs_video_id", Some("dont_like_dogs")).unwrap();
    let listing = p.list_all_videos();
    assert_eq!(listing.len(), p.count_videos());
    let titles: Vec<&str> = listing.iter().map(|l| l.video.title.as_str()).collect();
    assert_eq!(titles, vec!["Amazing Cats", "Another Cat Video", "Funny Dogs", "Life at Google", "Video about nothing"]);
    assert_eq!(listing[2].flag.as_deref(), Some("dont_like_dogs"));
  }
}
