use crate::ai;
use crate::board::Board;
use crate::history::MoveHistory;
use crate::rules::rules_for;
use crate::store::{self, SavedGame};
use crate::types::{Coord, GameMode, GameSnapshot, Move, Player, Variant, WinResult};
use crate::unlocks::UnlockRegistry;

/// One game in progress: the board, whose turn it is, the move record
/// and the final result once there is one. All mutation goes through
/// the play and undo entry points so those stay consistent.
#[derive(Clone, Debug)]
pub struct GameState {
  pub board: Board,
  pub to_move: Player,
  pub history: MoveHistory,
  pub result: Option<WinResult>,
  pub mode: GameMode,
}

impl GameState {
  pub fn new(variant: Variant, mode: GameMode) -> Self {
    Self {
      board: Board::new(variant),
      to_move: Player::One,
      history: MoveHistory::new(),
      result: None,
      mode,
    }
  }

  /// Start a game from the (board size, win condition) pair the
  /// selection screen hands over.
  pub fn from_selection(board_size: usize, win_condition: usize, mode: GameMode) -> Self {
    Self::new(Variant::classify(board_size, win_condition), mode)
  }

  pub fn snapshot(&self) -> GameSnapshot {
    let can_human_move = self.can_human_move();
    GameSnapshot {
      board_size: self.board.size(),
      win_condition: self.board.win_condition(),
      variant: self.board.variant(),
      board: self.board.cells(),
      to_move: self.to_move,
      result: self.result.clone(),
      moves_played: self.history.len(),
      mode: self.mode.clone(),
      can_human_move,
    }
  }

  pub fn can_human_move(&self) -> bool {
    if self.result.is_some() {
      return false;
    }
    match &self.mode {
      GameMode::HumanVsComputer { human } => self.to_move == *human,
      GameMode::HumanVsHuman => true,
    }
  }

  pub fn is_computer_turn(&self) -> bool {
    if self.result.is_some() {
      return false;
    }
    match &self.mode {
      GameMode::HumanVsComputer { human } => self.to_move != *human,
      GameMode::HumanVsHuman => false,
    }
  }

  /// A human placement at the given cell.
  pub fn play(&mut self, row: usize, col: usize) -> Result<(), String> {
    if self.result.is_some() {
      return Err("Game is already finished".to_string());
    }
    if !self.can_human_move() {
      return Err("Not the human player's turn".to_string());
    }
    self.apply(row, col)
  }

  /// A human drop into a column, for the gravity variant.
  pub fn play_column(&mut self, col: usize) -> Result<(), String> {
    if self.result.is_some() {
      return Err("Game is already finished".to_string());
    }
    if !self.can_human_move() {
      return Err("Not the human player's turn".to_string());
    }
    let row = self.board.drop_row(col).ok_or_else(|| "Column is full".to_string())?;
    self.apply(row, col)
  }

  /// Let the computer take its turn. Returns the cell it chose.
  pub fn play_computer(&mut self) -> Result<Coord, String> {
    if !self.is_computer_turn() {
      return Err("Not the computer's turn".to_string());
    }
    let last = self.history.last().map(|mv| Coord { row: mv.row, col: mv.col });
    let coord = ai::choose_move(&self.board, self.to_move, last);
    self.apply(coord.row, coord.col)?;
    Ok(coord)
  }

  fn apply(&mut self, row: usize, col: usize) -> Result<(), String> {
    if self.result.is_some() {
      return Err("Game is already finished".to_string());
    }

    let mv = Move { row, col, player: self.to_move };
    let rules = rules_for(self.board.variant());
    if !rules.is_legal(&self.board, &mv) {
      return Err("Illegal move".to_string());
    }

    self.board.set(mv.row, mv.col, mv.player);
    self.history.record(mv);

    let outcome = rules.check_win(&self.board, &mv);
    if outcome.is_over() {
      self.result = Some(outcome);
      return Ok(());
    }

    if self.board.is_full() {
      self.result = Some(WinResult::draw());
      return Ok(());
    }

    self.to_move = self.to_move.other();
    Ok(())
  }

  /// Take back the last move. Against the computer this keeps
  /// unwinding until the human is to act again, so one undo reverts a
  /// whole human-computer exchange. Returns how many moves came off.
  pub fn undo(&mut self) -> usize {
    let mut undone = 0;
    while let Some(mv) = self.history.undo_last() {
      self.board.clear(mv.row, mv.col);
      self.to_move = mv.player;
      self.result = None;
      undone += 1;
      match &self.mode {
        GameMode::HumanVsHuman => break,
        GameMode::HumanVsComputer { human } => {
          if self.to_move == *human {
            break;
          }
        }
      }
    }
    undone
  }

  pub fn reset(&mut self) {
    self.board.reset();
    self.history.clear();
    self.result = None;
    self.to_move = Player::One;
  }

  /// Report this game's variant to the unlock registry. True when the
  /// preset was seen for the first time.
  pub fn note_unlock(&self, registry: &mut dyn UnlockRegistry) -> Result<bool, String> {
    registry.note_played(self.board.variant())
  }

  pub fn to_saved(&self) -> SavedGame {
    SavedGame {
      board: store::encode_grid(&self.board),
      current_player: self.to_move,
      board_size: self.board.size(),
      win_condition: self.board.win_condition(),
      vs_computer: matches!(self.mode, GameMode::HumanVsComputer { .. }),
    }
  }

  /// Rebuild a game from its saved form. The move record is not part
  /// of the save, so a restored game starts with an empty history and
  /// undo is unavailable until new moves are played. A board with no
  /// playable cell left comes back as a finished draw, never as a live
  /// game.
  pub fn from_saved(saved: &SavedGame) -> Result<Self, String> {
    let variant = Variant::classify(saved.board_size, saved.win_condition);
    let mut board = Board::new(variant);
    let grid = store::decode_grid(&saved.board)?;
    if grid.len() != board.size() {
      return Err("Saved board does not match its declared size".to_string());
    }

    let mut ones = 0usize;
    let mut twos = 0usize;
    for (row, cells) in grid.iter().enumerate() {
      for (col, cell) in cells.iter().enumerate() {
        let Some(player) = cell else { continue };
        if !board.is_valid_position(row, col) {
          return Err("Saved stone on an unplayable cell".to_string());
        }
        match player {
          Player::One => ones += 1,
          Player::Two => twos += 1,
        }
        board.set(row, col, *player);
      }
    }
    if ones.abs_diff(twos) > 1 {
      return Err("Saved stone counts are inconsistent".to_string());
    }
    if variant.uses_gravity() {
      for col in 0..board.size() {
        for row in 1..board.size() - 1 {
          if board.get(row, col).is_some() && board.get(row + 1, col).is_none() {
            return Err("Saved stones are floating".to_string());
          }
        }
      }
    }

    let mode = if saved.vs_computer {
      GameMode::HumanVsComputer { human: Player::One }
    } else {
      GameMode::HumanVsHuman
    };
    // Turn gating must never hand a full board to either side.
    let result = if board.is_full() {
      Some(WinResult::draw())
    } else {
      None
    };
    Ok(Self {
      board,
      to_move: saved.current_player,
      history: MoveHistory::new(),
      result,
      mode,
    })
  }
}
