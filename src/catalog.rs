use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

pub type VideoId = String;

/// Library shipped inside the binary, used when no catalog file is configured.
const DEFAULT_LIBRARY: &str = include_str!("../videos.txt");

/// A single library entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
  pub id: VideoId,
  pub title: String,
  /// Unique, in first-seen order.
  pub tags: Vec<String>,
}

impl Video {
  pub fn new(id: impl Into<String>, title: impl Into<String>, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags.into_iter().map(Into::into) {
      if !unique.contains(&tag) {
        unique.push(tag);
      }
    }
    Self { id: id.into(), title: title.into(), tags: unique }
  }

  /// Case-insensitive tag membership.
  pub fn has_tag(&self, tag: &str) -> bool {
    let needle = tag.to_lowercase();
    self.tags.iter().any(|t| t.to_lowercase() == needle)
  }
}

impl fmt::Display for Video {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}) [{}]", self.title, self.id, self.tags.join(" "))
  }
}

/// Read access to the set of known videos. The player never mutates it.
pub trait VideoCatalog {
  /// Every video, in no particular order.
  fn videos(&self) -> Vec<&Video>;

  fn video(&self, id: &str) -> Option<&Video>;
}

/// In-memory catalog parsed from the `title | id | tags` line format.
#[derive(Debug, Default)]
pub struct VideoLibrary {
  videos: Vec<Video>,
  index: HashMap<VideoId, usize>,
}

impl VideoLibrary {
  pub fn from_videos(videos: Vec<Video>) -> Result<Self> {
    let mut index = HashMap::with_capacity(videos.len());
    for (pos, video) in videos.iter().enumerate() {
      if index.insert(video.id.clone(), pos).is_some() {
        bail!("duplicate video id '{}'", video.id);
      }
    }
    Ok(Self { videos, index })
  }

  /// Parse the line format. Blank lines and `#!` comment lines are skipped.
  pub fn parse(source: &str) -> Result<Self> {
    let mut videos = Vec::new();
    let mut seen = HashMap::new();
    for (idx, line) in source.lines().enumerate() {
      let line_no = idx + 1;
      let line = line.trim();
      if line.is_empty() || line.starts_with("#!") {
        continue;
      }
      let Some(video) = parse_video_line(line) else {
        bail!("line {}: expected `title | id | tags`", line_no);
      };
      if let Some(first) = seen.insert(video.id.clone(), line_no) {
        bail!("line {}: video id '{}' already defined on line {}", line_no, video.id, first);
      }
      videos.push(video);
    }
    Self::from_videos(videos)
  }

  pub fn load(path: &Path) -> Result<Self> {
    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let library = Self::parse(&content).with_context(|| format!("Invalid catalog {}", path.display()))?;
    info!(path = %path.display(), videos = library.len(), "catalog loaded");
    Ok(library)
  }

  pub fn embedded() -> Result<Self> {
    Self::parse(DEFAULT_LIBRARY).context("Embedded catalog is invalid")
  }

  pub fn len(&self) -> usize {
    self.videos.len()
  }

  pub fn is_empty(&self) -> bool {
    self.videos.is_empty()
  }
}

impl VideoCatalog for VideoLibrary {
  fn videos(&self) -> Vec<&Video> {
    self.videos.iter().collect()
  }

  fn video(&self, id: &str) -> Option<&Video> {
    self.index.get(id).map(|&pos| &self.videos[pos])
  }
}

/// Parse a single `title | id | tag, tag` line. The tag field may be absent.
fn parse_video_line(line: &str) -> Option<Video> {
  let parts: Vec<&str> = line.split('|').map(str::trim).collect();
  if parts.len() < 2 || parts.len() > 3 {
    return None;
  }
  let (title, id) = (parts[0], parts[1]);
  if id.is_empty() || id.contains(char::is_whitespace) {
    return None;
  }
  let tags = parts.get(2).map_or(Vec::new(), |raw| {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
  });
  Some(Video::new(id, title, tags))
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- Video ---

  #[test]
  fn display_joins_tags_with_spaces() {
    let v = Video::new("amazing_cats_video_id", "Amazing Cats", ["#cat", "#animal"]);
    assert_eq!(v.to_string(), "Amazing Cats (amazing_cats_video_id) [#cat #animal]");
  }

  #[test]
  fn display_without_tags() {
    let v = Video::new("nothing_video_id", "Video about nothing", Vec::<String>::new());
    assert_eq!(v.to_string(), "Video about nothing (nothing_video_id) []");
  }

  #[test]
  fn duplicate_tags_collapse_keeping_order() {
    let v = Video::new("v", "V", ["b", "a", "b"]);
    assert_eq!(v.tags, vec!["b", "a"]);
  }

  #[test]
  fn has_tag_is_case_insensitive_exact() {
    let v = Video::new("v", "V", ["#Cat"]);
    assert!(v.has_tag("#cat"));
    assert!(v.has_tag("#CAT"));
    assert!(!v.has_tag("cat"));
    assert!(!v.has_tag("#ca"));
  }

  // --- parse_video_line ---

  #[test]
  fn parse_line_with_tags() {
    let v = parse_video_line("Funny Dogs | funny_dogs_video_id |  #dog , #animal").unwrap();
    assert_eq!(v.title, "Funny Dogs");
    assert_eq!(v.id, "funny_dogs_video_id");
    assert_eq!(v.tags, vec!["#dog", "#animal"]);
  }

  #[test]
  fn parse_line_without_tag_field() {
    let v = parse_video_line("Quiet | quiet_id").unwrap();
    assert!(v.tags.is_empty());
    let v = parse_video_line("Quiet | quiet_id |").unwrap();
    assert!(v.tags.is_empty());
  }

  #[test]
  fn parse_line_rejects_malformed() {
    assert!(parse_video_line("just a title").is_none());
    assert!(parse_video_line("Title |  | #tag").is_none());
    assert!(parse_video_line("Title | has space | #tag").is_none());
    assert!(parse_video_line("a | b | c | d").is_none());
  }

  // --- VideoLibrary ---

  #[test]
  fn embedded_library_loads() {
    let lib = VideoLibrary::embedded().unwrap();
    assert_eq!(lib.len(), 5);
    let cats = lib.video("amazing_cats_video_id").unwrap();
    assert_eq!(cats.title, "Amazing Cats");
    assert!(lib.video("missing").is_none());
  }

  #[test]
  fn parse_skips_blank_and_comment_lines() {
    let lib = VideoLibrary::parse("#! header\n\nA | a | x\n   \nB | b |\n").unwrap();
    assert_eq!(lib.len(), 2);
  }

  #[test]
  fn parse_reports_line_number_of_bad_line() {
    let err = VideoLibrary::parse("A | a\nbroken\n").unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
  }

  #[test]
  fn parse_rejects_duplicate_ids() {
    let err = VideoLibrary::parse("A | a\nB | a\n").unwrap_err();
    assert!(err.to_string().contains("already defined on line 1"), "{err}");
  }

  #[test]
  fn from_videos_rejects_duplicate_ids() {
    let videos = vec![Video::new("a", "A", ["x"]), Video::new("a", "B", ["y"])];
    assert!(VideoLibrary::from_videos(videos).is_err());
  }
}
