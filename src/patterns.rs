use lazy_static::lazy_static;

use crate::board::Board;
use crate::types::{Coord, Player};

pub const WINDOW_RADIUS: usize = 5;
pub const WINDOW_LEN: usize = 2 * WINDOW_RADIUS + 1;

pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

const OWN: u8 = b'x';
const FOE: u8 = b'o';
const GAP: u8 = b'-';

/// Shapes a tentative placement can complete, weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Threat {
  None,
  Single,
  SimpleTwo,
  OpenTwo,
  SimpleThree,
  BrokenThree,
  OpenThree,
  SimpleFour,
  OpenFour,
  Five,
}

impl Threat {
  pub fn score(self) -> i32 {
    match self {
      Threat::Five => 1_000_000,
      Threat::OpenFour => 100_000,
      Threat::SimpleFour => 10_000,
      Threat::OpenThree => 1_000,
      Threat::BrokenThree => 100,
      Threat::SimpleThree => 50,
      Threat::OpenTwo => 10,
      Threat::SimpleTwo => 5,
      Threat::Single => 1,
      Threat::None => 0,
    }
  }

  /// Exponent used by the positional evaluation ladder.
  pub fn level(self) -> i32 {
    match self {
      Threat::Five => 16,
      Threat::OpenFour => 14,
      Threat::SimpleFour => 12,
      Threat::OpenThree => 10,
      Threat::BrokenThree => 8,
      Threat::SimpleThree => 6,
      Threat::OpenTwo => 4,
      Threat::SimpleTwo => 2,
      Threat::Single => 1,
      Threat::None => 0,
    }
  }
}

const FIVE_SHAPES: &[&str] = &["xxxxx"];
// Only the straight four with both ends free is unstoppable. Gapped
// fours have a single completion cell, so they sit with the blocked
// straight fours one tier down.
const OPEN_FOUR_SHAPES: &[&str] = &["-xxxx-"];
const SIMPLE_FOUR_SHAPES: &[&str] = &["xxxx-", "-xxxx", "xx-xx", "xxx-x", "x-xxx"];
const OPEN_THREE_SHAPES: &[&str] = &["--xxx-", "-xxx--", "-x-xx-", "-xx-x-"];
const BROKEN_THREE_SHAPES: &[&str] = &["-xxx-o", "o-xxx-", "ox-xx-", "-xx-xo", "oxx-x-", "-x-xxo"];
const SIMPLE_THREE_SHAPES: &[&str] = &["-xxx-", "xxx--", "--xxx", "x-xx", "xx-x"];
const OPEN_TWO_SHAPES: &[&str] = &["--xx--", "-x-x-"];
const SIMPLE_TWO_SHAPES: &[&str] = &["-xx-", "x-x"];
const SINGLE_SHAPES: &[&str] = &["-x-"];

lazy_static! {
  /// Shape table from strongest tier down. The first tier containing a
  /// matching shape classifies the window, so weaker tiers never see
  /// windows that also hold a stronger shape.
  static ref CATALOG: Vec<(Threat, Vec<&'static [u8]>)> = vec![
    (Threat::Five, shapes(FIVE_SHAPES)),
    (Threat::OpenFour, shapes(OPEN_FOUR_SHAPES)),
    (Threat::SimpleFour, shapes(SIMPLE_FOUR_SHAPES)),
    (Threat::OpenThree, shapes(OPEN_THREE_SHAPES)),
    (Threat::BrokenThree, shapes(BROKEN_THREE_SHAPES)),
    (Threat::SimpleThree, shapes(SIMPLE_THREE_SHAPES)),
    (Threat::OpenTwo, shapes(OPEN_TWO_SHAPES)),
    (Threat::SimpleTwo, shapes(SIMPLE_TWO_SHAPES)),
    (Threat::Single, shapes(SINGLE_SHAPES)),
  ];
}

fn shapes(raw: &[&'static str]) -> Vec<&'static [u8]> {
  raw.iter().map(|s| s.as_bytes()).collect()
}

/// The 11-cell line through (row, col) along dir, from the player's
/// point of view: 'x' own stones, 'o' opponent stones or off-board
/// cells, '-' empty. The center cell is written as 'x', the placement
/// being considered.
pub fn extract_window(
  board: &Board,
  row: usize,
  col: usize,
  dir: (i32, i32),
  player: Player,
) -> [u8; WINDOW_LEN] {
  let mut window = [FOE; WINDOW_LEN];
  for (i, slot) in window.iter_mut().enumerate() {
    let step = i as i32 - WINDOW_RADIUS as i32;
    if step == 0 {
      *slot = OWN;
      continue;
    }
    let r = row as i32 + step * dir.0;
    let c = col as i32 + step * dir.1;
    if r < 0 || c < 0 || !board.in_bounds(r as usize, c as usize) {
      continue;
    }
    *slot = match board.get(r as usize, c as usize) {
      Some(p) if p == player => OWN,
      Some(_) => FOE,
      None => GAP,
    };
  }
  window
}

pub fn classify_window(window: &[u8; WINDOW_LEN]) -> Threat {
  for (threat, tier) in CATALOG.iter() {
    if tier.iter().any(|shape| matches_center(window, shape)) {
      return *threat;
    }
  }
  Threat::None
}

// An occurrence only counts when it covers the center cell, otherwise
// the window would also score shapes the placement takes no part in.
fn matches_center(window: &[u8; WINDOW_LEN], shape: &[u8]) -> bool {
  let len = shape.len();
  let lo = (WINDOW_RADIUS + 1).saturating_sub(len);
  let hi = WINDOW_RADIUS.min(WINDOW_LEN - len);
  for start in lo..=hi {
    if &window[start..start + len] == shape {
      return true;
    }
  }
  false
}

pub fn threat_in_direction(
  board: &Board,
  row: usize,
  col: usize,
  dir: (i32, i32),
  player: Player,
) -> Threat {
  classify_window(&extract_window(board, row, col, dir, player))
}

/// Strongest shape the placement completes in any of the four
/// directions.
pub fn best_threat(board: &Board, row: usize, col: usize, player: Player) -> Threat {
  DIRECTIONS
    .iter()
    .map(|&dir| threat_in_direction(board, row, col, dir, player))
    .max()
    .unwrap_or(Threat::None)
}

/// Best placement threat for every empty cell, in row-major order.
pub fn threat_map(board: &Board, player: Player) -> Vec<(Coord, Threat)> {
  let mut out = Vec::new();
  for row in 0..board.size() {
    for col in 0..board.size() {
      if board.is_empty(row, col) {
        out.push((Coord { row, col }, best_threat(board, row, col, player)));
      }
    }
  }
  out
}

pub const LEVEL_CAP: i32 = 16;

/// Weight of a cell's two strongest directional levels. The ladder
/// grows by 1.8 per level with a small extra push on the best one, so
/// one high threat outweighs many scattered low ones.
pub fn combine_levels(a: i32, b: i32) -> f64 {
  let a = a.min(LEVEL_CAP);
  let b = b.min(LEVEL_CAP);
  1.5 * 1.8f64.powi(a) + 1.8f64.powi(b)
}

pub fn point_score(board: &Board, row: usize, col: usize, player: Player) -> f64 {
  let mut levels = [0i32; 4];
  for (slot, &dir) in levels.iter_mut().zip(DIRECTIONS.iter()) {
    *slot = threat_in_direction(board, row, col, dir, player).level();
  }
  levels.sort_unstable();
  if levels[3] == 0 {
    return 0.0;
  }
  combine_levels(levels[3], levels[2])
}

/// Positional potential of the whole board for one side, summed over
/// the empty cells that side could still claim.
pub fn board_score(board: &Board, player: Player) -> f64 {
  let mut total = 0.0;
  for row in 0..board.size() {
    for col in 0..board.size() {
      if board.is_empty(row, col) {
        total += point_score(board, row, col, player);
      }
    }
  }
  total
}
