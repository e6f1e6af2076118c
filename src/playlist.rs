use std::collections::BTreeMap;

use crate::catalog::VideoId;

/// A named, ordered, duplicate-free list of video ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
  /// Name as the user first typed it.
  pub name: String,
  videos: Vec<VideoId>,
}

impl Playlist {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), videos: Vec::new() }
  }

  pub fn contains(&self, id: &str) -> bool {
    self.videos.iter().any(|v| v == id)
  }

  /// Appends `id` unless it is already present. Returns whether it was added.
  pub fn push(&mut self, id: impl Into<VideoId>) -> bool {
    let id = id.into();
    if self.contains(&id) {
      return false;
    }
    self.videos.push(id);
    true
  }

  /// Removes `id`, keeping the order of the remaining entries.
  pub fn remove(&mut self, id: &str) -> bool {
    let Some(pos) = self.videos.iter().position(|v| v == id) else { return false };
    self.videos.remove(pos);
    true
  }

  pub fn clear(&mut self) {
    self.videos.clear();
  }

  pub fn len(&self) -> usize {
    self.videos.len()
  }

  pub fn is_empty(&self) -> bool {
    self.videos.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.videos.iter().map(String::as_str)
  }
}

/// Playlists keyed by case-folded name.
///
/// Two names that differ only in case refer to the same playlist. Iteration
/// follows the folded key, so listings come out sorted case-insensitively.
#[derive(Debug, Default)]
pub struct PlaylistRegistry {
  playlists: BTreeMap<String, Playlist>,
}

fn fold(name: &str) -> String {
  name.to_lowercase()
}

impl PlaylistRegistry {
  pub fn contains(&self, name: &str) -> bool {
    self.playlists.contains_key(&fold(name))
  }

  /// Inserts an empty playlist. Returns `false` if the name is taken.
  pub fn create(&mut self, name: &str) -> bool {
    let key = fold(name);
    if self.playlists.contains_key(&key) {
      return false;
    }
    self.playlists.insert(key, Playlist::new(name));
    true
  }

  pub fn get(&self, name: &str) -> Option<&Playlist> {
    self.playlists.get(&fold(name))
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut Playlist> {
    self.playlists.get_mut(&fold(name))
  }

  pub fn delete(&mut self, name: &str) -> Option<Playlist> {
    self.playlists.remove(&fold(name))
  }

  /// Display names in case-insensitive ascending order.
  pub fn names(&self) -> Vec<&str> {
    self.playlists.values().map(|p| p.name.as_str()).collect()
  }

  pub fn is_empty(&self) -> bool {
    self.playlists.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- Playlist ---

  #[test]
  fn push_rejects_duplicates() {
    let mut p = Playlist::new("mix");
    assert!(p.push("a"));
    assert!(!p.push("a"));
    assert_eq!(p.len(), 1);
  }

  #[test]
  fn remove_keeps_order_of_remaining() {
    let mut p = Playlist::new("mix");
    for id in ["a", "b", "c"] {
      p.push(id);
    }
    assert!(p.remove("b"));
    assert!(!p.remove("b"));
    assert_eq!(p.iter().collect::<Vec<_>>(), vec!["a", "c"]);
  }

  #[test]
  fn clear_empties_but_keeps_name() {
    let mut p = Playlist::new("Mix");
    p.push("a");
    p.clear();
    assert!(p.is_empty());
    assert_eq!(p.name, "Mix");
  }

  // --- PlaylistRegistry ---

  #[test]
  fn names_collide_case_insensitively() {
    let mut reg = PlaylistRegistry::default();
    assert!(reg.create("Foo"));
    assert!(!reg.create("foo"));
    assert!(!reg.create("FOO"));
    assert_eq!(reg.get("fOo").unwrap().name, "Foo");
  }

  #[test]
  fn names_sorted_case_insensitively() {
    let mut reg = PlaylistRegistry::default();
    for name in ["beta", "Alpha", "gamma", "Delta"] {
      reg.create(name);
    }
    assert_eq!(reg.names(), vec!["Alpha", "beta", "Delta", "gamma"]);
  }

  #[test]
  fn delete_removes_entirely() {
    let mut reg = PlaylistRegistry::default();
    reg.create("Mix");
    assert!(reg.delete("MIX").is_some());
    assert!(!reg.contains("mix"));
    assert!(reg.is_empty());
    assert!(reg.delete("mix").is_none());
  }
}
