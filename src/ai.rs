use std::collections::HashSet;

use rand::seq::SliceRandom;

use crate::board::Board;
use crate::hex;
use crate::patterns::{self, Threat};
use crate::rules::{rules_for, GravityRules, RuleSet};
use crate::types::{Coord, Move, Player, Variant};

const TEMPO_BONUS: f64 = 8.0;

/// Shape tiers worth answering immediately, strongest first. Anything
/// below a broken three is left to the positional evaluation.
const FORCING_TIERS: [Threat; 5] = [
  Threat::Five,
  Threat::OpenFour,
  Threat::SimpleFour,
  Threat::OpenThree,
  Threat::BrokenThree,
];

/// Pick the computer's reply for `player`. `last` is the most recent
/// move on the board; variants without a shape heuristic play near it.
/// Panics when no playable cell is left, callers gate on the game
/// still being open.
pub fn choose_move(board: &Board, player: Player, last: Option<Coord>) -> Coord {
  assert!(!board.is_full(), "computer asked to move on a full board");
  match board.variant() {
    Variant::TicTacToe => tic_tac_toe_move(board, player),
    Variant::ConnectFour => connect_four_move(board, player),
    Variant::Hex | Variant::Havannah { .. } => nearest_cell_move(board, last),
    Variant::Standard | Variant::Custom { .. } => gomoku_move(board, player),
  }
}

/// Win, block, center, random corner, random edge.
fn tic_tac_toe_move(board: &Board, player: Player) -> Coord {
  if let Some(coord) = winning_cell(board, player) {
    return coord;
  }
  if let Some(coord) = winning_cell(board, player.other()) {
    return coord;
  }
  let size = board.size();
  let center = size / 2;
  if board.is_empty(center, center) {
    return Coord { row: center, col: center };
  }
  let mut rng = rand::thread_rng();
  let corners = [(0, 0), (0, size - 1), (size - 1, 0), (size - 1, size - 1)];
  let open_corners: Vec<Coord> = corners
    .iter()
    .filter(|&&(row, col)| board.is_empty(row, col))
    .map(|&(row, col)| Coord { row, col })
    .collect();
  if let Some(&coord) = open_corners.choose(&mut rng) {
    return coord;
  }
  match board.empty_coords().choose(&mut rng) {
    Some(&coord) => coord,
    None => unreachable!("board was not full"),
  }
}

/// Winning column, blocking column, center column, then the open
/// column nearest the center (lower index on ties).
fn connect_four_move(board: &Board, player: Player) -> Coord {
  if let Some(coord) = winning_drop(board, player) {
    return coord;
  }
  if let Some(coord) = winning_drop(board, player.other()) {
    return coord;
  }
  let center = board.size() / 2;
  if let Some(row) = board.drop_row(center) {
    return Coord { row, col: center };
  }
  let mut best: Option<(i32, Coord)> = None;
  for col in 0..board.size() {
    if let Some(row) = board.drop_row(col) {
      let dist = (col as i32 - center as i32).abs();
      if best.map_or(true, |(d, _)| dist < d) {
        best = Some((dist, Coord { row, col }));
      }
    }
  }
  match best {
    Some((_, coord)) => coord,
    None => unreachable!("board was not full"),
  }
}

/// Answer forcing shapes tier by tier, own chances before blocks, then
/// fall back to the positional evaluation.
fn gomoku_move(board: &Board, player: Player) -> Coord {
  let own = patterns::threat_map(board, player);
  let theirs = patterns::threat_map(board, player.other());
  for tier in FORCING_TIERS {
    if let Some(coord) = first_reaching(&own, tier) {
      return coord;
    }
    if let Some(coord) = first_reaching(&theirs, tier) {
      return coord;
    }
  }
  positional_move(board, player)
}

fn first_reaching(map: &[(Coord, Threat)], tier: Threat) -> Option<Coord> {
  map
    .iter()
    .find(|(_, threat)| threat.score() >= tier.score())
    .map(|(coord, _)| *coord)
}

fn positional_move(board: &Board, player: Player) -> Coord {
  let candidates = candidate_moves(board);
  let mut work_board = board.clone();
  let mut best: Option<(f64, Coord)> = None;
  for coord in candidates {
    let Some(trial) = work_board.trial(coord.row, coord.col, player) else {
      continue;
    };
    let value = patterns::board_score(&trial, player)
      - patterns::board_score(&trial, player.other())
      + TEMPO_BONUS;
    if best.map_or(true, |(b, _)| value > b) {
      best = Some((value, coord));
    }
  }
  match best {
    Some((_, coord)) => coord,
    None => unreachable!("no candidate cells on a non-full board"),
  }
}

/// Empty cells within one step of an existing stone, in row-major
/// order. An empty board offers just the center.
fn candidate_moves(board: &Board) -> Vec<Coord> {
  let size = board.size();
  let mut candidate_set = HashSet::new();
  let mut has_stones = false;

  for row in 0..size {
    for col in 0..size {
      if board.get(row, col).is_none() {
        continue;
      }
      has_stones = true;
      for dr in -1i32..=1 {
        for dc in -1i32..=1 {
          if dr == 0 && dc == 0 {
            continue;
          }
          let nr = row as i32 + dr;
          let nc = col as i32 + dc;
          if nr >= 0 && nc >= 0 {
            let ur = nr as usize;
            let uc = nc as usize;
            if board.is_empty(ur, uc) {
              candidate_set.insert((ur, uc));
            }
          }
        }
      }
    }
  }

  if !has_stones {
    return vec![Coord { row: size / 2, col: size / 2 }];
  }

  let mut out = Vec::new();
  for row in 0..size {
    for col in 0..size {
      if candidate_set.contains(&(row, col)) {
        out.push(Coord { row, col });
      }
    }
  }
  out
}

/// First empty cell whose tentative placement wins outright, in
/// row-major order.
fn winning_cell(board: &Board, player: Player) -> Option<Coord> {
  let rules = rules_for(board.variant());
  let mut work_board = board.clone();
  for coord in board.empty_coords() {
    let mv = Move { row: coord.row, col: coord.col, player };
    if let Some(trial) = work_board.trial(coord.row, coord.col, player) {
      if rules.check_win(&trial, &mv).winner.is_some() {
        return Some(coord);
      }
    }
  }
  None
}

/// Like winning_cell, but only drop rows are tried.
fn winning_drop(board: &Board, player: Player) -> Option<Coord> {
  let mut work_board = board.clone();
  for col in 0..board.size() {
    let Some(row) = board.drop_row(col) else {
      continue;
    };
    let mv = Move { row, col, player };
    if let Some(trial) = work_board.trial(row, col, player) {
      if GravityRules.check_win(&trial, &mv).winner.is_some() {
        return Some(Coord { row, col });
      }
    }
  }
  None
}

/// Hex and Havannah have no shape table; stay close to the action by
/// playing the empty cell nearest the last stone, at random among
/// ties. With no stone to anchor on, take the center.
fn nearest_cell_move(board: &Board, last: Option<Coord>) -> Coord {
  let mut rng = rand::thread_rng();
  let Some(anchor) = last else {
    let center = board.size() / 2;
    if board.is_empty(center, center) {
      return Coord { row: center, col: center };
    }
    return match board.empty_coords().choose(&mut rng) {
      Some(&coord) => coord,
      None => unreachable!("board was not full"),
    };
  };
  let mut best_dist = i32::MAX;
  let mut best: Vec<Coord> = Vec::new();
  for coord in board.empty_coords() {
    let dist = hex::distance((anchor.row, anchor.col), (coord.row, coord.col));
    if dist < best_dist {
      best_dist = dist;
      best.clear();
      best.push(coord);
    } else if dist == best_dist {
      best.push(coord);
    }
  }
  match best.choose(&mut rng) {
    Some(&coord) => coord,
    None => unreachable!("board was not full"),
  }
}
