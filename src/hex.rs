use crate::board::Board;
use crate::rules::RuleSet;
use crate::types::{Coord, Move, Player, Variant, WinKind, WinResult};

/// Neighbor offsets for the odd-r layout, as (row delta, col delta).
/// Rows shift to the right on odd indices, so the two diagonal
/// neighbors swap sides with row parity.
pub const EVEN_ROW_OFFSETS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
pub const ODD_ROW_OFFSETS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

pub fn neighbor_offsets(row: usize) -> &'static [(i32, i32); 6] {
  if row % 2 == 0 {
    &EVEN_ROW_OFFSETS
  } else {
    &ODD_ROW_OFFSETS
  }
}

/// The up-to-six hex neighbors of (row, col) inside a size x size grid.
pub fn neighbors(row: usize, col: usize, size: usize) -> Vec<(usize, usize)> {
  let mut out = Vec::with_capacity(6);
  for &(dr, dc) in neighbor_offsets(row) {
    let nr = row as i32 + dr;
    let nc = col as i32 + dc;
    if nr >= 0 && nc >= 0 && (nr as usize) < size && (nc as usize) < size {
      out.push((nr as usize, nc as usize));
    }
  }
  out
}

/// Odd-r offset coordinates to cube coordinates (q, r, s) with q + r + s = 0.
pub fn cube(row: usize, col: usize) -> (i32, i32, i32) {
  let r = row as i32;
  let q = col as i32 - (r - (r & 1)) / 2;
  (q, r, -q - r)
}

/// Hex-grid distance between two offset cells.
pub fn distance(a: (usize, usize), b: (usize, usize)) -> i32 {
  let (aq, ar, asx) = cube(a.0, a.1);
  let (bq, br, bsx) = cube(b.0, b.1);
  ((aq - bq).abs() + (ar - br).abs() + (asx - bsx).abs()) / 2
}

/// Whether (row, col) lies on the hexagon of the given edge length,
/// embedded in its (2 * edge_length - 1) square with the hexagon's
/// center at the square's center.
pub fn in_hexagon(edge_length: usize, row: usize, col: usize) -> bool {
  let range = edge_length as i32 - 1;
  let center = edge_length - 1;
  let (q, r, s) = cube(row, col);
  let (cq, cr, cs) = cube(center, center);
  (q - cq).abs() + (r - cr).abs() + (s - cs).abs() <= 2 * range
}

/// Hex win rules: One connects the top row to the bottom row, Two the
/// left column to the right column. Placement anywhere empty.
pub struct HexRules;

impl RuleSet for HexRules {
  fn is_legal(&self, board: &Board, mv: &Move) -> bool {
    board.is_empty(mv.row, mv.col)
  }

  fn check_win(&self, board: &Board, mv: &Move) -> WinResult {
    if board.variant() != Variant::Hex {
      return WinResult::none();
    }
    match connecting_path(board, mv.player) {
      Some(cells) => WinResult::win(mv.player, WinKind::Line, cells),
      None => WinResult::none(),
    }
  }
}

/// Depth-first search from the player's starting edge over their stones,
/// with an explicit stack. Returns the path from start edge to target
/// edge when the two are connected.
fn connecting_path(board: &Board, player: Player) -> Option<Vec<Coord>> {
  let size = board.size();
  let mut visited = vec![false; size * size];
  let mut parent: Vec<Option<usize>> = vec![None; size * size];
  let mut stack: Vec<usize> = Vec::new();

  let seeds: Vec<(usize, usize)> = match player {
    Player::One => (0..size).map(|col| (0, col)).collect(),
    Player::Two => (0..size).map(|row| (row, 0)).collect(),
  };
  for (row, col) in seeds {
    if board.get(row, col) == Some(player) {
      let idx = row * size + col;
      visited[idx] = true;
      stack.push(idx);
    }
  }

  while let Some(idx) = stack.pop() {
    let row = idx / size;
    let col = idx % size;
    let reached = match player {
      Player::One => row == size - 1,
      Player::Two => col == size - 1,
    };
    if reached {
      let mut path = Vec::new();
      let mut cursor = Some(idx);
      while let Some(i) = cursor {
        path.push(Coord { row: i / size, col: i % size });
        cursor = parent[i];
      }
      path.reverse();
      return Some(path);
    }
    for (nr, nc) in neighbors(row, col, size) {
      let nidx = nr * size + nc;
      if !visited[nidx] && board.get(nr, nc) == Some(player) {
        visited[nidx] = true;
        parent[nidx] = Some(idx);
        stack.push(nidx);
      }
    }
  }
  None
}
