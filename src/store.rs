use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::Player;

/// A game reduced to what the save file needs. The grid is kept as
/// text so the file stays readable and diffable by hand.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
  pub board: String,
  pub current_player: Player,
  pub board_size: usize,
  pub win_condition: usize,
  pub vs_computer: bool,
}

/// Where the one saved game lives. A file on disk in the app, a plain
/// field in tests.
pub trait SavedGameStore {
  fn save(&mut self, saved: &SavedGame) -> Result<(), String>;
  fn load(&self) -> Option<SavedGame>;
  fn clear(&mut self) -> Result<(), String>;
}

pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }
}

impl SavedGameStore for FileStore {
  fn save(&mut self, saved: &SavedGame) -> Result<(), String> {
    let data = serde_json::to_string_pretty(saved).map_err(|e| e.to_string())?;
    fs::write(&self.path, data).map_err(|e| e.to_string())
  }

  fn load(&self) -> Option<SavedGame> {
    let data = fs::read_to_string(&self.path).ok()?;
    serde_json::from_str(&data).ok()
  }

  fn clear(&mut self) -> Result<(), String> {
    if self.path.exists() {
      fs::remove_file(&self.path).map_err(|e| e.to_string())?;
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct MemoryStore {
  saved: Option<SavedGame>,
}

impl SavedGameStore for MemoryStore {
  fn save(&mut self, saved: &SavedGame) -> Result<(), String> {
    self.saved = Some(saved.clone());
    Ok(())
  }

  fn load(&self) -> Option<SavedGame> {
    self.saved.clone()
  }

  fn clear(&mut self) -> Result<(), String> {
    self.saved = None;
    Ok(())
  }
}

pub fn data_root() -> PathBuf {
  let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  manifest_dir.join("data")
}

pub fn saved_game_path() -> PathBuf {
  data_root().join("saved_game.json")
}

pub fn ensure_data_dir() -> Result<(), String> {
  fs::create_dir_all(data_root()).map_err(|e| e.to_string())
}

/// Rows joined by ';', cells by ',', with 0 empty, 1 and 2 the players.
pub fn encode_grid(board: &Board) -> String {
  let mut rows = Vec::with_capacity(board.size());
  for row in 0..board.size() {
    let mut cells = Vec::with_capacity(board.size());
    for col in 0..board.size() {
      let value = match board.get(row, col) {
        None => "0",
        Some(Player::One) => "1",
        Some(Player::Two) => "2",
      };
      cells.push(value);
    }
    rows.push(cells.join(","));
  }
  rows.join(";")
}

pub fn decode_grid(encoded: &str) -> Result<Vec<Vec<Option<Player>>>, String> {
  let mut grid = Vec::new();
  for row_text in encoded.split(';') {
    let mut cells = Vec::new();
    for cell_text in row_text.split(',') {
      let cell = match cell_text {
        "0" => None,
        "1" => Some(Player::One),
        "2" => Some(Player::Two),
        _ => return Err("Saved board contains an unknown cell value".to_string()),
      };
      cells.push(cell);
    }
    grid.push(cells);
  }
  if grid.iter().any(|row| row.len() != grid.len()) {
    return Err("Saved board is not square".to_string());
  }
  Ok(grid)
}
