use std::ops::Deref;

use crate::hex;
use crate::types::{Coord, Player, Variant};

/// Square grid of cells, flat row-major storage. The variant decides which
/// cells are playable: Havannah masks the hexagon out of the bounding square
/// and Connect-4 reserves the top row so the 7x7 array plays as the usual
/// 7-wide, 6-tall well.
#[derive(Clone, Debug)]
pub struct Board {
  variant: Variant,
  size: usize,
  cells: Vec<Option<Player>>,
}

impl Board {
  pub fn new(variant: Variant) -> Self {
    let size = variant.board_size();
    Self {
      variant,
      size,
      cells: vec![None; size * size],
    }
  }

  pub fn variant(&self) -> Variant {
    self.variant
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn win_condition(&self) -> usize {
    self.variant.win_condition()
  }

  pub fn in_bounds(&self, row: usize, col: usize) -> bool {
    row < self.size && col < self.size
  }

  pub fn index(&self, row: usize, col: usize) -> usize {
    row * self.size + col
  }

  pub fn is_valid_position(&self, row: usize, col: usize) -> bool {
    if !self.in_bounds(row, col) {
      return false;
    }
    match self.variant {
      Variant::Havannah { edge_length } => hex::in_hexagon(edge_length, row, col),
      Variant::ConnectFour => row > 0,
      _ => true,
    }
  }

  pub fn get(&self, row: usize, col: usize) -> Option<Player> {
    if !self.in_bounds(row, col) {
      return None;
    }
    self.cells[self.index(row, col)]
  }

  pub(crate) fn set(&mut self, row: usize, col: usize, player: Player) {
    let idx = self.index(row, col);
    self.cells[idx] = Some(player);
  }

  pub fn clear(&mut self, row: usize, col: usize) {
    let idx = self.index(row, col);
    self.cells[idx] = None;
  }

  /// Checked placement. False (and no mutation) when the cell is occupied,
  /// out of bounds, masked out, or in Connect-4's reserved row.
  pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
    if !self.is_valid_position(row, col) {
      return false;
    }
    if self.cells[self.index(row, col)].is_some() {
      return false;
    }
    self.set(row, col, player);
    true
  }

  /// Lowest empty row of a gravity column, or None when the column is full
  /// or the variant has no gravity.
  pub fn drop_row(&self, col: usize) -> Option<usize> {
    if !self.variant.uses_gravity() || col >= self.size {
      return None;
    }
    for row in (1..self.size).rev() {
      if self.cells[self.index(row, col)].is_none() {
        return Some(row);
      }
    }
    None
  }

  pub fn place_column(&mut self, col: usize, player: Player) -> Option<usize> {
    let row = self.drop_row(col)?;
    self.set(row, col, player);
    Some(row)
  }

  pub fn is_empty(&self, row: usize, col: usize) -> bool {
    self.is_valid_position(row, col) && self.cells[self.index(row, col)].is_none()
  }

  /// True iff no `place` call can succeed anywhere.
  pub fn is_full(&self) -> bool {
    for row in 0..self.size {
      for col in 0..self.size {
        if self.is_empty(row, col) {
          return false;
        }
      }
    }
    true
  }

  pub fn empty_coords(&self) -> Vec<Coord> {
    let mut coords = Vec::new();
    for row in 0..self.size {
      for col in 0..self.size {
        if self.is_empty(row, col) {
          coords.push(Coord { row, col });
        }
      }
    }
    coords
  }

  pub fn cells(&self) -> Vec<Option<Player>> {
    self.cells.clone()
  }

  pub fn reset(&mut self) {
    for cell in self.cells.iter_mut() {
      *cell = None;
    }
  }

  /// Scoped trial placement for heuristic evaluation. The stone is removed
  /// when the guard drops, so an early return can never leak it.
  pub fn trial(&mut self, row: usize, col: usize, player: Player) -> Option<Trial<'_>> {
    if !self.place(row, col, player) {
      return None;
    }
    Some(Trial {
      board: self,
      row,
      col,
    })
  }
}

pub struct Trial<'a> {
  board: &'a mut Board,
  row: usize,
  col: usize,
}

impl Deref for Trial<'_> {
  type Target = Board;

  fn deref(&self) -> &Board {
    self.board
  }
}

impl Drop for Trial<'_> {
  fn drop(&mut self) {
    self.board.clear(self.row, self.col);
  }
}
