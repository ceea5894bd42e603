use crate::types::Move;

/// Chronological record of placed moves. The engine owns the paired-undo
/// policy; this type only appends and pops.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
  moves: Vec<Move>,
}

impl MoveHistory {
  pub fn new() -> Self {
    Self { moves: Vec::new() }
  }

  pub fn record(&mut self, mv: Move) {
    self.moves.push(mv);
  }

  pub fn undo_last(&mut self) -> Option<Move> {
    self.moves.pop()
  }

  pub fn last(&self) -> Option<&Move> {
    self.moves.last()
  }

  pub fn len(&self) -> usize {
    self.moves.len()
  }

  pub fn is_empty(&self) -> bool {
    self.moves.is_empty()
  }

  pub fn moves(&self) -> &[Move] {
    &self.moves
  }

  pub fn clear(&mut self) {
    self.moves.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Player;

  fn mv(row: usize, col: usize, player: Player) -> Move {
    Move { row, col, player }
  }

  #[test]
  fn records_in_order_and_pops_in_reverse() {
    let mut history = MoveHistory::new();
    history.record(mv(0, 0, Player::One));
    history.record(mv(1, 1, Player::Two));
    assert_eq!(history.len(), 2);
    assert_eq!(history.last(), Some(&mv(1, 1, Player::Two)));
    assert_eq!(history.undo_last(), Some(mv(1, 1, Player::Two)));
    assert_eq!(history.undo_last(), Some(mv(0, 0, Player::One)));
    assert_eq!(history.undo_last(), None);
  }

  #[test]
  fn clear_empties_the_record() {
    let mut history = MoveHistory::new();
    history.record(mv(2, 3, Player::One));
    history.clear();
    assert!(history.is_empty());
    assert_eq!(history.last(), None);
  }
}
