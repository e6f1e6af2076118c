use thiserror::Error;

use crate::search::SearchMode;

/// One parsed line of the command language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  NumberOfVideos,
  ShowAllVideos,
  Play(String),
  PlayRandom,
  Stop,
  Pause,
  Continue,
  ShowPlaying,
  CreatePlaylist(String),
  AddToPlaylist { playlist: String, video: String },
  RemoveFromPlaylist { playlist: String, video: String },
  ClearPlaylist(String),
  DeletePlaylist(String),
  ShowPlaylist(String),
  ShowAllPlaylists,
  Search { term: String, mode: SearchMode },
  Flag { video: String, reason: Option<String> },
  Allow(String),
  Help,
  Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
  #[error("unknown command '{0}'")]
  Unknown(String),

  #[error("usage: {0}")]
  Usage(&'static str),
}

/// Keyword, usage line, description. Drives both parsing hints and HELP.
pub const COMMANDS: &[(&str, &str, &str)] = &[
  ("NUMBER_OF_VIDEOS", "NUMBER_OF_VIDEOS", "Shows how many videos are in the library."),
  ("SHOW_ALL_VIDEOS", "SHOW_ALL_VIDEOS", "Lists all videos from the library."),
  ("PLAY", "PLAY <video_id>", "Plays specified video."),
  ("PLAY_RANDOM", "PLAY_RANDOM", "Plays a random video from the library."),
  ("STOP", "STOP", "Stop the current video."),
  ("PAUSE", "PAUSE", "Pause the current video."),
  ("CONTINUE", "CONTINUE", "Resume the current paused video."),
  ("SHOW_PLAYING", "SHOW_PLAYING", "Displays the title, video_id, video tags and paused status of the video that is playing now."),
  ("CREATE_PLAYLIST", "CREATE_PLAYLIST <playlist_name>", "Creates a new (empty) playlist with the provided name."),
  ("ADD_TO_PLAYLIST", "ADD_TO_PLAYLIST <playlist_name> <video_id>", "Adds the requested video to the playlist."),
  ("REMOVE_FROM_PLAYLIST", "REMOVE_FROM_PLAYLIST <playlist_name> <video_id>", "Removes the specified video from the specified playlist."),
  ("CLEAR_PLAYLIST", "CLEAR_PLAYLIST <playlist_name>", "Removes all the videos from the playlist."),
  ("DELETE_PLAYLIST", "DELETE_PLAYLIST <playlist_name>", "Deletes the playlist."),
  ("SHOW_PLAYLIST", "SHOW_PLAYLIST <playlist_name>", "List all the videos in this playlist."),
  ("SHOW_ALL_PLAYLISTS", "SHOW_ALL_PLAYLISTS", "Display all the available playlists."),
  ("SEARCH_VIDEOS", "SEARCH_VIDEOS <search_term>", "Display all the videos whose titles contain the search_term."),
  ("SEARCH_VIDEOS_WITH_TAG", "SEARCH_VIDEOS_WITH_TAG <tag_name>", "Display all videos whose tags contains the provided tag."),
  ("FLAG_VIDEO", "FLAG_VIDEO <video_id> [flag_reason]", "Mark a video as flagged."),
  ("ALLOW_VIDEO", "ALLOW_VIDEO <video_id>", "Removes a flag from a video."),
  ("HELP", "HELP", "Displays help."),
  ("EXIT", "EXIT", "Terminates the program execution."),
];

fn usage(keyword: &str) -> &'static str {
  COMMANDS.iter().find(|(k, _, _)| *k == keyword).map_or("HELP", |(_, u, _)| *u)
}

/// Parse a command line. Returns `Ok(None)` for blank lines.
///
/// Keywords are case-insensitive; arguments are kept verbatim. The flag reason
/// is everything after the video id.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
  let mut words = line.split_whitespace();
  let Some(keyword) = words.next() else { return Ok(None) };
  let keyword = keyword.to_uppercase();
  let args: Vec<&str> = words.collect();

  let arity = |n: usize| -> Result<(), ParseError> {
    if args.len() == n { Ok(()) } else { Err(ParseError::Usage(usage(&keyword))) }
  };
  let arg = |i: usize| args[i].to_string();

  let command = match keyword.as_str() {
    "NUMBER_OF_VIDEOS" => arity(0).map(|_| Command::NumberOfVideos)?,
    "SHOW_ALL_VIDEOS" => arity(0).map(|_| Command::ShowAllVideos)?,
    "PLAY" => arity(1).map(|_| Command::Play(arg(0)))?,
    "PLAY_RANDOM" => arity(0).map(|_| Command::PlayRandom)?,
    "STOP" => arity(0).map(|_| Command::Stop)?,
    "PAUSE" => arity(0).map(|_| Command::Pause)?,
    "CONTINUE" => arity(0).map(|_| Command::Continue)?,
    "SHOW_PLAYING" => arity(0).map(|_| Command::ShowPlaying)?,
    "CREATE_PLAYLIST" => arity(1).map(|_| Command::CreatePlaylist(arg(0)))?,
    "ADD_TO_PLAYLIST" => arity(2).map(|_| Command::AddToPlaylist { playlist: arg(0), video: arg(1) })?,
    "REMOVE_FROM_PLAYLIST" => arity(2).map(|_| Command::RemoveFromPlaylist { playlist: arg(0), video: arg(1) })?,
    "CLEAR_PLAYLIST" => arity(1).map(|_| Command::ClearPlaylist(arg(0)))?,
    "DELETE_PLAYLIST" => arity(1).map(|_| Command::DeletePlaylist(arg(0)))?,
    "SHOW_PLAYLIST" => arity(1).map(|_| Command::ShowPlaylist(arg(0)))?,
    "SHOW_ALL_PLAYLISTS" => arity(0).map(|_| Command::ShowAllPlaylists)?,
    "SEARCH_VIDEOS" => arity(1).map(|_| Command::Search { term: arg(0), mode: SearchMode::Title })?,
    "SEARCH_VIDEOS_WITH_TAG" => arity(1).map(|_| Command::Search { term: arg(0), mode: SearchMode::Tag })?,
    "FLAG_VIDEO" => {
      if args.is_empty() {
        return Err(ParseError::Usage(usage(&keyword)));
      }
      let reason = (args.len() > 1).then(|| args[1..].join(" "));
      Command::Flag { video: arg(0), reason }
    }
    "ALLOW_VIDEO" => arity(1).map(|_| Command::Allow(arg(0)))?,
    "HELP" => Command::Help,
    "EXIT" => Command::Exit,
    _ => return Err(ParseError::Unknown(keyword.clone())),
  };
  Ok(Some(command))
}

impl Command {
  /// Keyword used in logs and JSON output.
  pub fn name(&self) -> &'static str {
    match self {
      Command::NumberOfVideos => "number_of_videos",
      Command::ShowAllVideos => "show_all_videos",
      Command::Play(_) => "play",
      Command::PlayRandom => "play_random",
      Command::Stop => "stop",
      Command::Pause => "pause",
      Command::Continue => "continue",
      Command::ShowPlaying => "show_playing",
      Command::CreatePlaylist(_) => "create_playlist",
      Command::AddToPlaylist { .. } => "add_to_playlist",
      Command::RemoveFromPlaylist { .. } => "remove_from_playlist",
      Command::ClearPlaylist(_) => "clear_playlist",
      Command::DeletePlaylist(_) => "delete_playlist",
      Command::ShowPlaylist(_) => "show_playlist",
      Command::ShowAllPlaylists => "show_all_playlists",
      Command::Search { mode: SearchMode::Title, .. } => "search_videos",
      Command::Search { mode: SearchMode::Tag, .. } => "search_videos_with_tag",
      Command::Flag { .. } => "flag_video",
      Command::Allow(_) => "allow_video",
      Command::Help => "help",
      Command::Exit => "exit",
    }
  }
}
