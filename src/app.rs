use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::catalog::{VideoCatalog, VideoLibrary};
use crate::constants::constants;
use crate::display::{Detail, OutputMode, Outcome, help_entries, render, render_parse_error};
use crate::input::{Command, parse_command};
use crate::player::VideoPlayer;
use crate::search::{SearchMode, SearchResults};

/// Drives the player from a line-oriented command source.
pub struct App<C = VideoLibrary> {
  pub player: VideoPlayer<C>,
  pub output: OutputMode,
  /// Print the banner and a prompt before each command.
  pub interactive: bool,
  pub should_quit: bool,
}

impl<C: VideoCatalog> App<C> {
  pub fn new(player: VideoPlayer<C>, output: OutputMode) -> Self {
    Self { player, output, interactive: false, should_quit: false }
  }

  /// Run one command against the player.
  pub fn execute(&mut self, command: &Command) -> Outcome {
    let p = &mut self.player;
    let outcome = match command {
      Command::NumberOfVideos => Ok(Detail::Count(p.count_videos())),
      Command::ShowAllVideos => Ok(Detail::Videos(p.list_all_videos())),
      Command::Play(id) => p.play(id).map(Detail::Played),
      Command::PlayRandom => p.play_random().map(Detail::Played),
      Command::Stop => p.stop().map(Detail::Video),
      Command::Pause => p.pause().map(Detail::Pause),
      Command::Continue => p.resume().map(Detail::Video),
      Command::ShowPlaying => p.show_current().map(Detail::NowPlaying),
      Command::CreatePlaylist(name) => p.create_playlist(name).map(Detail::Name),
      Command::AddToPlaylist { playlist, video } => p.add_to_playlist(playlist, video).map(Detail::Video),
      Command::RemoveFromPlaylist { playlist, video } => p.remove_from_playlist(playlist, video).map(Detail::Video),
      Command::ClearPlaylist(name) => p.clear_playlist(name).map(Detail::Name),
      Command::DeletePlaylist(name) => p.delete_playlist(name).map(Detail::Name),
      Command::ShowPlaylist(name) => p.show_playlist(name).map(Detail::Playlist),
      Command::ShowAllPlaylists => p.show_all_playlists().map(Detail::Names),
      Command::Search { term, mode: SearchMode::Title } => p.search_by_title(term).map(Detail::Search),
      Command::Search { term, mode: SearchMode::Tag } => p.search_by_tag(term).map(Detail::Search),
      Command::Flag { video, reason } => p.flag(video, reason.as_deref()).map(Detail::Flagged),
      Command::Allow(video) => p.unflag(video).map(Detail::Video),
      Command::Help => Ok(Detail::Help(help_entries())),
      Command::Exit => {
        self.should_quit = true;
        Ok(Detail::Exit)
      }
    };
    let status = self.player.playback().status();
    match &outcome {
      Ok(_) => debug!(command = command.name(), %status, "command applied"),
      Err(e) => debug!(command = command.name(), error = %e, kind = e.kind().as_str(), %status, "command rejected"),
    }
    outcome
  }

  /// Read commands until `EXIT` or end of input.
  pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<()> {
    if self.interactive && self.output == OutputMode::Text {
      writeln!(out, "{}", constants().banner)?;
    }
    let mut line = String::new();
    while !self.should_quit {
      if self.interactive && self.output == OutputMode::Text {
        write!(out, "{}", constants().prompt)?;
        out.flush()?;
      }
      line.clear();
      if input.read_line(&mut line).context("Failed to read command")? == 0 {
        info!("end of input");
        break;
      }
      self.handle_line(&line, input, out)?;
    }
    Ok(())
  }

  fn handle_line<R: BufRead, W: Write>(&mut self, line: &str, input: &mut R, out: &mut W) -> Result<()> {
    let command = match parse_command(line) {
      Ok(Some(command)) => command,
      Ok(None) => return Ok(()),
      Err(e) => {
        warn!(line = line.trim_end(), error = %e, "unparseable command");
        return write_lines(out, render_parse_error(self.output, &e)?);
      }
    };
    debug!(command = command.name(), "dispatch");
    let outcome = self.execute(&command);
    write_lines(out, render(self.output, &command, &outcome)?)?;
    if let Ok(Detail::Search(results)) = outcome {
      self.offer_selection(&results, input, out)?;
    }
    Ok(())
  }

  /// Read one answer line and play the chosen result, if any.
  ///
  /// An answer that is not a valid result number is treated as "no".
  fn offer_selection<R: BufRead, W: Write>(&mut self, results: &SearchResults, input: &mut R, out: &mut W) -> Result<()> {
    let mut answer = String::new();
    if input.read_line(&mut answer).context("Failed to read selection")? == 0 {
      return Ok(());
    }
    let Some(video) = results.pick(&answer) else {
      debug!(answer = answer.trim_end(), "no search selection");
      return Ok(());
    };
    info!(video = %video.id, term = %results.term, "search selection");
    let command = Command::Play(video.id.clone());
    let outcome = self.execute(&command);
    write_lines(out, render(self.output, &command, &outcome)?)
  }
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> Result<()> {
  for line in lines {
    writeln!(out, "{}", line)?;
  }
  Ok(())
}
