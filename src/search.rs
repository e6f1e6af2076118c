use serde::Serialize;

use crate::catalog::Video;

/// How a search term is compared against a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
  /// Case-insensitive substring of the video's full textual form (title, id and tags).
  Title,
  /// Case-insensitive exact match against one of the video's tags.
  Tag,
}

impl SearchMode {
  pub fn matches(self, video: &Video, term: &str) -> bool {
    match self {
      SearchMode::Title => video.to_string().to_lowercase().contains(&term.to_lowercase()),
      SearchMode::Tag => video.has_tag(term),
    }
  }
}

/// Numbered search hits, in title order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
  pub term: String,
  pub videos: Vec<Video>,
}

impl SearchResults {
  /// Resolve a 1-based answer from the "play one of these?" prompt.
  ///
  /// Only a plain run of ASCII digits within range selects a video; anything
  /// else, including an empty line, means no selection.
  pub fn pick(&self, answer: &str) -> Option<&Video> {
    let answer = answer.trim_end_matches(['\r', '\n']);
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    let n: usize = answer.parse().ok()?;
    n.checked_sub(1).and_then(|idx| self.videos.get(idx))
  }

  /// `(number, video)` pairs starting at 1.
  pub fn numbered(&self) -> impl Iterator<Item = (usize, &Video)> {
    self.videos.iter().enumerate().map(|(i, v)| (i + 1, v))
  }
}
