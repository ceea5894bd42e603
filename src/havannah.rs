use std::collections::HashSet;

use crate::board::Board;
use crate::hex;
use crate::rules::RuleSet;
use crate::types::{Coord, Move, Player, Variant, WinKind, WinResult};

fn relative_cube(edge_length: usize, row: usize, col: usize) -> (i32, i32, i32) {
  let center = edge_length - 1;
  let (q, r, s) = hex::cube(row, col);
  let (cq, cr, cs) = hex::cube(center, center);
  (q - cq, r - cr, s - cs)
}

/// Whether the cell sits on the outer rim of the hexagon.
pub fn on_boundary(edge_length: usize, row: usize, col: usize) -> bool {
  let range = 2 * (edge_length as i32 - 1);
  let (q, r, s) = relative_cube(edge_length, row, col);
  q.abs() + r.abs() + s.abs() == range
}

/// Corners are the six cells where two cube coordinates sit at the
/// hexagon's radius.
pub fn is_corner(edge_length: usize, row: usize, col: usize) -> bool {
  let range = edge_length as i32 - 1;
  let (q, r, s) = relative_cube(edge_length, row, col);
  [q, r, s].iter().filter(|v| v.abs() == range).count() == 2
}

/// The edge (0-5) a boundary cell lies on. Corners belong to no edge.
pub fn edge_index(edge_length: usize, row: usize, col: usize) -> Option<usize> {
  let range = edge_length as i32 - 1;
  let (q, r, s) = relative_cube(edge_length, row, col);
  if q.abs() + r.abs() + s.abs() != 2 * range {
    return None;
  }
  if [q, r, s].iter().filter(|v| v.abs() == range).count() != 1 {
    return None;
  }
  let index = if q == range {
    0
  } else if q == -range {
    1
  } else if r == range {
    2
  } else if r == -range {
    3
  } else if s == range {
    4
  } else {
    5
  };
  Some(index)
}

/// Havannah wins on any of three shapes formed by one connected group:
/// a ring around at least one other cell, a bridge joining two corners,
/// or a fork reaching three edges. Rings outrank bridges outrank forks.
pub struct HavannahRules;

impl RuleSet for HavannahRules {
  fn is_legal(&self, board: &Board, mv: &Move) -> bool {
    board.is_empty(mv.row, mv.col)
  }

  fn check_win(&self, board: &Board, mv: &Move) -> WinResult {
    let edge_length = match board.variant() {
      Variant::Havannah { edge_length } => edge_length,
      _ => return WinResult::none(),
    };
    let component = component_of(board, mv.row, mv.col, mv.player);
    if component.is_empty() {
      return WinResult::none();
    }
    let members: HashSet<(usize, usize)> = component.iter().map(|c| (c.row, c.col)).collect();
    if encloses_a_cell(board, edge_length, &members) {
      return WinResult::win(mv.player, WinKind::Ring, component);
    }
    let corners = component
      .iter()
      .filter(|c| is_corner(edge_length, c.row, c.col))
      .count();
    if corners >= 2 {
      return WinResult::win(mv.player, WinKind::Bridge, component);
    }
    let edges: HashSet<usize> = component
      .iter()
      .filter_map(|c| edge_index(edge_length, c.row, c.col))
      .collect();
    if edges.len() >= 3 {
      return WinResult::win(mv.player, WinKind::Fork, component);
    }
    WinResult::none()
  }
}

/// The connected group of the player's stones containing (row, col),
/// flooded with an explicit stack.
fn component_of(board: &Board, row: usize, col: usize, player: Player) -> Vec<Coord> {
  if board.get(row, col) != Some(player) {
    return Vec::new();
  }
  let size = board.size();
  let mut seen = vec![false; size * size];
  let mut stack = vec![(row, col)];
  let mut out = Vec::new();
  seen[row * size + col] = true;
  while let Some((r, c)) = stack.pop() {
    out.push(Coord { row: r, col: c });
    for (nr, nc) in hex::neighbors(r, c, size) {
      if !seen[nr * size + nc] && board.get(nr, nc) == Some(player) {
        seen[nr * size + nc] = true;
        stack.push((nr, nc));
      }
    }
  }
  out
}

/// A ring strictly surrounds at least one cell that is not part of the
/// group itself. Flood the rest of the hexagon inward from its rim;
/// any playable cell left unreached is enclosed.
fn encloses_a_cell(board: &Board, edge_length: usize, members: &HashSet<(usize, usize)>) -> bool {
  let size = board.size();
  let mut reached = vec![false; size * size];
  let mut stack = Vec::new();
  for row in 0..size {
    for col in 0..size {
      if board.is_valid_position(row, col)
        && on_boundary(edge_length, row, col)
        && !members.contains(&(row, col))
      {
        reached[row * size + col] = true;
        stack.push((row, col));
      }
    }
  }
  while let Some((r, c)) = stack.pop() {
    for (nr, nc) in hex::neighbors(r, c, size) {
      if board.is_valid_position(nr, nc) && !reached[nr * size + nc] && !members.contains(&(nr, nc)) {
        reached[nr * size + nc] = true;
        stack.push((nr, nc));
      }
    }
  }
  for row in 0..size {
    for col in 0..size {
      if board.is_valid_position(row, col)
        && !members.contains(&(row, col))
        && !reached[row * size + col]
      {
        return true;
      }
    }
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;

  const EDGE: usize = 8;

  fn havannah_board() -> Board {
    Board::new(Variant::Havannah { edge_length: EDGE })
  }

  fn place_all(board: &mut Board, cells: &[(usize, usize)], player: Player) {
    for &(row, col) in cells {
      board.set(row, col, player);
    }
  }

  #[test]
  fn corner_and_boundary_counts() {
    let board = havannah_board();
    let size = board.size();
    let mut corners = 0;
    let mut rim = 0;
    for row in 0..size {
      for col in 0..size {
        if !board.is_valid_position(row, col) {
          continue;
        }
        if is_corner(EDGE, row, col) {
          corners += 1;
        }
        if on_boundary(EDGE, row, col) {
          rim += 1;
        }
      }
    }
    assert_eq!(corners, 6);
    assert_eq!(rim, 6 * (EDGE - 1));
  }

  #[test]
  fn known_corners_for_edge_eight() {
    for (row, col) in [(0, 4), (0, 11), (7, 0), (7, 14), (14, 4), (14, 11)] {
      assert!(is_corner(EDGE, row, col), "({row},{col}) should be a corner");
      assert_eq!(edge_index(EDGE, row, col), None);
    }
    assert!(!is_corner(EDGE, 0, 7));
    assert!(edge_index(EDGE, 0, 7).is_some());
    assert_eq!(edge_index(EDGE, 7, 7), None);
  }

  #[test]
  fn ring_of_six_wins() {
    let mut board = havannah_board();
    let ring = [(6, 7), (6, 8), (7, 6), (7, 8), (8, 7), (8, 8)];
    place_all(&mut board, &ring, Player::One);
    let mv = Move { row: 8, col: 8, player: Player::One };
    let result = HavannahRules.check_win(&board, &mv);
    assert_eq!(result.winner, Some(Player::One));
    assert_eq!(result.kind, WinKind::Ring);
    assert_eq!(result.cells.len(), 6);
  }

  #[test]
  fn ring_around_opponent_stone_wins() {
    let mut board = havannah_board();
    board.set(7, 7, Player::Two);
    let ring = [(6, 7), (6, 8), (7, 6), (7, 8), (8, 7), (8, 8)];
    place_all(&mut board, &ring, Player::One);
    let mv = Move { row: 7, col: 6, player: Player::One };
    assert_eq!(HavannahRules.check_win(&board, &mv).kind, WinKind::Ring);
  }

  #[test]
  fn solid_group_without_hole_is_not_a_ring() {
    let mut board = havannah_board();
    let cells = [(6, 7), (6, 8), (7, 6), (7, 7), (7, 8), (8, 7), (8, 8)];
    place_all(&mut board, &cells, Player::One);
    let mv = Move { row: 7, col: 7, player: Player::One };
    assert_eq!(HavannahRules.check_win(&board, &mv).winner, None);
  }

  #[test]
  fn bridge_joins_two_corners() {
    let mut board = havannah_board();
    let chain: Vec<(usize, usize)> = (4..=11).map(|col| (0, col)).collect();
    place_all(&mut board, &chain, Player::Two);
    let mv = Move { row: 0, col: 11, player: Player::Two };
    let result = HavannahRules.check_win(&board, &mv);
    assert_eq!(result.winner, Some(Player::Two));
    assert_eq!(result.kind, WinKind::Bridge);
  }

  #[test]
  fn fork_reaches_three_edges() {
    let mut board = havannah_board();
    let mut cells: Vec<(usize, usize)> = (0..15).map(|row| (row, 7)).collect();
    cells.extend((8..=12).map(|col| (3, col)));
    place_all(&mut board, &cells, Player::One);
    let mv = Move { row: 3, col: 12, player: Player::One };
    let result = HavannahRules.check_win(&board, &mv);
    assert_eq!(result.winner, Some(Player::One));
    assert_eq!(result.kind, WinKind::Fork);
  }

  #[test]
  fn two_edges_are_not_a_fork() {
    let mut board = havannah_board();
    let cells: Vec<(usize, usize)> = (0..15).map(|row| (row, 7)).collect();
    place_all(&mut board, &cells, Player::One);
    let mv = Move { row: 14, col: 7, player: Player::One };
    assert_eq!(HavannahRules.check_win(&board, &mv).winner, None);
  }

  #[test]
  fn touching_one_corner_is_not_a_bridge() {
    let mut board = havannah_board();
    place_all(&mut board, &[(0, 4), (0, 5)], Player::One);
    let mv = Move { row: 0, col: 5, player: Player::One };
    assert_eq!(HavannahRules.check_win(&board, &mv).winner, None);
  }
}
