use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
  One,
  Two,
}

impl Player {
  pub fn other(self) -> Self {
    match self {
      Player::One => Player::Two,
      Player::Two => Player::One,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coord {
  pub row: usize,
  pub col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
  pub row: usize,
  pub col: usize,
  pub player: Player,
}

/// The supported games. Presets carry their own geometry; `Custom` covers any
/// other in-range (size, win condition) pair under plain N-in-a-row rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
  Standard,
  TicTacToe,
  ConnectFour,
  Hex,
  #[serde(rename_all = "camelCase")]
  Havannah { edge_length: usize },
  #[serde(rename_all = "camelCase")]
  Custom { board_size: usize, win_condition: usize },
}

impl Variant {
  /// Map a stored (boardSize, winCondition) pair back to a variant. The pair
  /// encoding is what the presentation and persistence layers speak; known
  /// preset pairs win over the custom interpretation, and anything out of
  /// range falls back to Standard.
  pub fn classify(board_size: usize, win_condition: usize) -> Variant {
    match (board_size, win_condition) {
      (15, 5) => Variant::Standard,
      (3, 3) => Variant::TicTacToe,
      (7, 4) => Variant::ConnectFour,
      (11, 8) => Variant::Hex,
      (15, 9) => Variant::Havannah { edge_length: 8 },
      (19, 9) => Variant::Havannah { edge_length: 10 },
      (size, win) if (3..=19).contains(&size) && win >= 3 && win <= size => Variant::Custom {
        board_size: size,
        win_condition: win,
      },
      _ => Variant::Standard,
    }
  }

  pub fn board_size(&self) -> usize {
    match self {
      Variant::Standard => 15,
      Variant::TicTacToe => 3,
      Variant::ConnectFour => 7,
      Variant::Hex => 11,
      Variant::Havannah { edge_length } => 2 * edge_length - 1,
      Variant::Custom { board_size, .. } => *board_size,
    }
  }

  // Hex and Havannah store sentinel values here; only the row games read it
  // as an actual run length.
  pub fn win_condition(&self) -> usize {
    match self {
      Variant::Standard => 5,
      Variant::TicTacToe => 3,
      Variant::ConnectFour => 4,
      Variant::Hex => 8,
      Variant::Havannah { .. } => 9,
      Variant::Custom { win_condition, .. } => *win_condition,
    }
  }

  pub fn hex_edge_length(&self) -> Option<usize> {
    match self {
      Variant::Havannah { edge_length } => Some(*edge_length),
      _ => None,
    }
  }

  pub fn uses_gravity(&self) -> bool {
    matches!(self, Variant::ConnectFour)
  }

  /// Name under which a special preset is recorded in the unlock registry.
  /// Standard and custom games are not tracked.
  pub fn preset_name(&self) -> Option<&'static str> {
    match self {
      Variant::TicTacToe => Some("tic_tac_toe"),
      Variant::ConnectFour => Some("connect_four"),
      Variant::Hex => Some("hex"),
      Variant::Havannah { .. } => Some("havannah"),
      Variant::Standard | Variant::Custom { .. } => None,
    }
  }
}

impl Default for Variant {
  fn default() -> Self {
    Variant::Standard
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinKind {
  None,
  Line,
  Ring,
  Bridge,
  Fork,
}

/// Outcome of a win check. `cells` carries the winning group for the
/// hex-topology variants (connecting path or component) so the UI can
/// highlight it; the row games leave it empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinResult {
  pub winner: Option<Player>,
  pub draw: bool,
  pub kind: WinKind,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub cells: Vec<Coord>,
}

impl WinResult {
  pub fn none() -> Self {
    Self {
      winner: None,
      draw: false,
      kind: WinKind::None,
      cells: Vec::new(),
    }
  }

  pub fn draw() -> Self {
    Self {
      winner: None,
      draw: true,
      kind: WinKind::None,
      cells: Vec::new(),
    }
  }

  pub fn line(player: Player) -> Self {
    Self {
      winner: Some(player),
      draw: false,
      kind: WinKind::Line,
      cells: Vec::new(),
    }
  }

  pub fn win(player: Player, kind: WinKind, cells: Vec<Coord>) -> Self {
    Self {
      winner: Some(player),
      draw: false,
      kind,
      cells,
    }
  }

  pub fn is_over(&self) -> bool {
    self.winner.is_some() || self.draw
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMode {
  #[serde(rename_all = "camelCase")]
  HumanVsComputer { human: Player },
  HumanVsHuman,
}

impl Default for GameMode {
  fn default() -> Self {
    GameMode::HumanVsComputer {
      human: Player::One,
    }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
  pub board_size: usize,
  pub win_condition: usize,
  pub variant: Variant,
  pub board: Vec<Option<Player>>,
  pub to_move: Player,
  pub result: Option<WinResult>,
  pub moves_played: usize,
  pub mode: GameMode,
  pub can_human_move: bool,
}
