use crate::board::Board;
use crate::havannah::HavannahRules;
use crate::hex::HexRules;
use crate::types::{Move, Player, Variant, WinResult};

pub trait RuleSet {
  fn is_legal(&self, board: &Board, mv: &Move) -> bool;
  fn check_win(&self, board: &Board, mv: &Move) -> WinResult;
}

pub struct LineRules;

impl RuleSet for LineRules {
  fn is_legal(&self, board: &Board, mv: &Move) -> bool {
    board.is_empty(mv.row, mv.col)
  }

  fn check_win(&self, board: &Board, mv: &Move) -> WinResult {
    let directions = [(1, 0), (0, 1), (1, 1), (1, -1)];

    for (dr, dc) in directions {
      let mut count = 1;
      count += count_dir(board, mv.row, mv.col, dr, dc, mv.player);
      count += count_dir(board, mv.row, mv.col, -dr, -dc, mv.player);

      if count >= board.win_condition() {
        return WinResult::line(mv.player);
      }
    }

    WinResult::none()
  }
}

pub struct GravityRules;

impl RuleSet for GravityRules {
  fn is_legal(&self, board: &Board, mv: &Move) -> bool {
    board.drop_row(mv.col) == Some(mv.row)
  }

  fn check_win(&self, board: &Board, mv: &Move) -> WinResult {
    LineRules.check_win(board, mv)
  }
}

pub fn rules_for(variant: Variant) -> Box<dyn RuleSet> {
  match variant {
    Variant::ConnectFour => Box::new(GravityRules),
    Variant::Hex => Box::new(HexRules),
    Variant::Havannah { .. } => Box::new(HavannahRules),
    Variant::Standard | Variant::TicTacToe | Variant::Custom { .. } => Box::new(LineRules),
  }
}

fn count_dir(board: &Board, row: usize, col: usize, dr: i32, dc: i32, player: Player) -> usize {
  let mut count = 0;
  let mut cr = row as i32 + dr;
  let mut cc = col as i32 + dc;

  while cr >= 0 && cc >= 0 {
    let ur = cr as usize;
    let uc = cc as usize;
    if !board.in_bounds(ur, uc) {
      break;
    }
    if board.get(ur, uc) != Some(player) {
      break;
    }
    count += 1;
    cr += dr;
    cc += dc;
  }

  count
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standard_board() -> Board {
    Board::new(Variant::Standard)
  }

  fn run(board: &mut Board, cells: &[(usize, usize)], player: Player) -> Move {
    for &(row, col) in cells {
      board.set(row, col, player);
    }
    let &(row, col) = cells.last().unwrap();
    Move { row, col, player }
  }

  #[test]
  fn five_in_a_row_wins_in_every_direction() {
    let lines: [Vec<(usize, usize)>; 4] = [
      (0..5).map(|i| (7, 3 + i)).collect(),
      (0..5).map(|i| (3 + i, 7)).collect(),
      (0..5).map(|i| (3 + i, 3 + i)).collect(),
      (0..5).map(|i| (3 + i, 10 - i)).collect(),
    ];
    for cells in lines {
      let mut board = standard_board();
      let mv = run(&mut board, &cells, Player::One);
      assert_eq!(LineRules.check_win(&board, &mv).winner, Some(Player::One), "{cells:?}");
    }
  }

  #[test]
  fn four_in_a_row_is_not_enough() {
    let mut board = standard_board();
    let mv = run(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Player::One);
    assert_eq!(LineRules.check_win(&board, &mv).winner, None);
  }

  #[test]
  fn overline_counts_as_a_win() {
    let mut board = standard_board();
    let cells: Vec<(usize, usize)> = (0..6).map(|i| (7, 3 + i)).collect();
    let mv = run(&mut board, &cells, Player::Two);
    assert_eq!(LineRules.check_win(&board, &mv).winner, Some(Player::Two));
  }

  #[test]
  fn gap_breaks_the_run() {
    let mut board = standard_board();
    board.set(7, 3, Player::One);
    board.set(7, 4, Player::One);
    board.set(7, 6, Player::One);
    board.set(7, 7, Player::One);
    let mv = Move { row: 7, col: 7, player: Player::One };
    assert_eq!(LineRules.check_win(&board, &mv).winner, None);
  }

  #[test]
  fn run_against_the_board_edge_wins() {
    let mut board = standard_board();
    let cells: Vec<(usize, usize)> = (0..5).map(|i| (0, i)).collect();
    let mv = run(&mut board, &cells, Player::One);
    assert_eq!(LineRules.check_win(&board, &mv).winner, Some(Player::One));
  }

  #[test]
  fn three_wins_tic_tac_toe() {
    let mut board = Board::new(Variant::TicTacToe);
    let mv = run(&mut board, &[(0, 0), (1, 1), (2, 2)], Player::Two);
    assert_eq!(LineRules.check_win(&board, &mv).winner, Some(Player::Two));
  }

  #[test]
  fn custom_win_condition_is_honored() {
    let mut board = Board::new(Variant::Custom { board_size: 9, win_condition: 4 });
    let mv = run(&mut board, &[(4, 2), (4, 3), (4, 4), (4, 5)], Player::One);
    assert_eq!(LineRules.check_win(&board, &mv).winner, Some(Player::One));
  }

  #[test]
  fn occupied_and_out_of_bounds_cells_are_illegal() {
    let mut board = standard_board();
    board.set(7, 7, Player::One);
    assert!(!LineRules.is_legal(&board, &Move { row: 7, col: 7, player: Player::Two }));
    assert!(!LineRules.is_legal(&board, &Move { row: 20, col: 7, player: Player::Two }));
    assert!(LineRules.is_legal(&board, &Move { row: 7, col: 8, player: Player::Two }));
  }

  #[test]
  fn gravity_only_allows_the_drop_row() {
    let board = Board::new(Variant::ConnectFour);
    assert!(GravityRules.is_legal(&board, &Move { row: 6, col: 3, player: Player::One }));
    assert!(!GravityRules.is_legal(&board, &Move { row: 3, col: 3, player: Player::One }));
    assert!(!GravityRules.is_legal(&board, &Move { row: 0, col: 3, player: Player::One }));
  }

  #[test]
  fn gravity_win_uses_line_detection() {
    let mut board = Board::new(Variant::ConnectFour);
    for row in 3..=6 {
      board.set(row, 2, Player::One);
    }
    let mv = Move { row: 3, col: 2, player: Player::One };
    assert_eq!(GravityRules.check_win(&board, &mv).winner, Some(Player::One));
  }
}
