use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store;
use crate::types::Variant;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UnlockFile {
  unlocked: Vec<String>,
}

/// Tracks which of the named presets have ever been played.
pub trait UnlockRegistry {
  fn contains(&self, name: &str) -> bool;
  fn add(&mut self, name: &str) -> Result<(), String>;

  /// Record that a variant was played. True the first time one of the
  /// named presets comes through; plain boards never unlock anything.
  fn note_played(&mut self, variant: Variant) -> Result<bool, String> {
    let Some(name) = variant.preset_name() else {
      return Ok(false);
    };
    if self.contains(name) {
      return Ok(false);
    }
    self.add(name)?;
    Ok(true)
  }
}

#[derive(Default)]
pub struct MemoryUnlocks {
  names: HashSet<String>,
}

impl UnlockRegistry for MemoryUnlocks {
  fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  fn add(&mut self, name: &str) -> Result<(), String> {
    self.names.insert(name.to_string());
    Ok(())
  }
}

pub struct FileUnlocks {
  path: PathBuf,
  names: HashSet<String>,
}

impl FileUnlocks {
  pub fn load_or_default(path: PathBuf) -> Self {
    let mut names = HashSet::new();
    if let Ok(data) = fs::read_to_string(&path) {
      if let Ok(file) = serde_json::from_str::<UnlockFile>(&data) {
        names = file.unlocked.into_iter().collect();
      }
    }
    Self { path, names }
  }

  fn persist(&self) -> Result<(), String> {
    let mut unlocked: Vec<String> = self.names.iter().cloned().collect();
    unlocked.sort();
    let file = UnlockFile { unlocked };
    let data = serde_json::to_string_pretty(&file).map_err(|e| e.to_string())?;
    fs::write(&self.path, data).map_err(|e| e.to_string())
  }
}

impl UnlockRegistry for FileUnlocks {
  fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  fn add(&mut self, name: &str) -> Result<(), String> {
    if self.names.insert(name.to_string()) {
      self.persist()?;
    }
    Ok(())
  }
}

pub fn unlocks_path() -> PathBuf {
  store::data_root().join("unlocks.json")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wuziqi-{}-{}.json", tag, std::process::id()))
  }

  #[test]
  fn presets_unlock_once() {
    let mut registry = MemoryUnlocks::default();
    assert_eq!(registry.note_played(Variant::TicTacToe), Ok(true));
    assert_eq!(registry.note_played(Variant::TicTacToe), Ok(false));
    assert!(registry.contains("tic_tac_toe"));
  }

  #[test]
  fn plain_boards_never_unlock() {
    let mut registry = MemoryUnlocks::default();
    assert_eq!(registry.note_played(Variant::Standard), Ok(false));
    let custom = Variant::Custom {
      board_size: 9,
      win_condition: 5,
    };
    assert_eq!(registry.note_played(custom), Ok(false));
    assert!(!registry.contains("standard"));
  }

  #[test]
  fn both_havannah_sizes_share_one_unlock() {
    let mut registry = MemoryUnlocks::default();
    assert_eq!(registry.note_played(Variant::Havannah { edge_length: 8 }), Ok(true));
    assert_eq!(
      registry.note_played(Variant::Havannah { edge_length: 10 }),
      Ok(false)
    );
  }

  #[test]
  fn file_unlocks_survive_a_reload() {
    let path = temp_path("unlocks");
    let _ = fs::remove_file(&path);

    let mut registry = FileUnlocks::load_or_default(path.clone());
    assert_eq!(registry.note_played(Variant::Hex), Ok(true));
    assert_eq!(registry.note_played(Variant::ConnectFour), Ok(true));

    let reloaded = FileUnlocks::load_or_default(path.clone());
    assert!(reloaded.contains("hex"));
    assert!(reloaded.contains("connect_four"));

    let _ = fs::remove_file(path);
  }

  #[test]
  fn corrupt_unlock_files_start_empty() {
    let path = temp_path("unlocks-corrupt");
    fs::write(&path, "not json").unwrap();
    let registry = FileUnlocks::load_or_default(path.clone());
    assert!(!registry.contains("hex"));
    let _ = fs::remove_file(path);
  }
}
