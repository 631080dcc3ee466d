//! Pattern evaluation: per-move scores for ordering and full-board scores
//! for minimax leaves.

use crate::board::{Board, CENTER, DIRECTIONS, SIZE};
use crate::player::{Cell, Role};
use crate::rules;
use crate::scores::Scores;
use crate::shapes::{self, Shape, JUMP_THREES, JUMP_TWOS};

// Opponent weight in move urgency, in tenths
const URGENCY_DEFENSE_TENTHS: i64 = 12;

// Opponent weight in the static evaluation, in tenths
const DEFENSE_WEIGHT_TENTHS: i64 = 15;
const RELAXED_DEFENSE_WEIGHT_TENTHS: i64 = 5;

/// Run length and open ends through (x, y); see `rules::line_open_ends`.
pub fn count_line(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> (usize, u8) {
  rules::line_open_ends(board, x, y, dx, dy, role)
}

/// Bonus for broken threes and twos in the 11-cell window centered on (x, y).
/// Each shape counts at most once per window.
pub fn jump_pattern_score(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> i64 {
  let window = rules::line_window(board, x, y, dx, dy, 5);
  let threes = JUMP_THREES.iter().filter(|p| shapes::find(&window, p, role).is_some()).count() as i64;
  let twos = JUMP_TWOS.iter().filter(|p| shapes::find(&window, p, role).is_some()).count() as i64;
  threes * Scores::get(Shape::JUMP_THREE) + twos * Scores::get(Shape::JUMP_TWO)
}

/// Score of putting `role` on the empty (x, y), summed over the four axes.
pub fn position_score(board: &mut Board, x: i32, y: i32, role: Role) -> i64 {
  if !board.is_empty(x, y) {
    return 0;
  }
  board.with_stone(x, y, role, |b| {
    DIRECTIONS
      .iter()
      .map(|&(dx, dy)| {
        let (count, open_ends) = count_line(b, x, y, dx, dy, role);
        // A fully blocked run still scores as a closed one here
        Scores::get(Shape::from_line(count, open_ends.max(1)))
      })
      .sum()
  })
}

/// Ordering heuristic only: attack value, weighted defense value, and a
/// small pull toward the center. Occupied cells sort last.
pub fn move_urgency(board: &mut Board, x: i32, y: i32, role: Role, opponent: Role) -> i64 {
  if !board.is_empty(x, y) {
    return i64::MIN;
  }
  let attack = position_score(board, x, y, role);
  let defense = position_score(board, x, y, opponent);
  let center_distance = (x - CENTER as i32).abs() + (y - CENTER as i32).abs();
  attack + defense * URGENCY_DEFENSE_TENTHS / 10 + (14 - center_distance as i64) * 2
}

#[derive(Debug, Default, Clone, Copy)]
struct SideTally {
  score: i64,
  open_threes: u32,
  fours: u32,
}

impl SideTally {
  fn with_combinations(mut self) -> i64 {
    if self.open_threes >= 2 {
      self.score += Scores::get(Shape::DOUBLE_THREE);
    }
    if self.fours >= 2 {
      self.score += Scores::get(Shape::DOUBLE_FOUR);
    }
    if self.fours >= 1 && self.open_threes >= 1 {
      self.score += Scores::get(Shape::FOUR_THREE);
    }
    self.score
  }
}

/// Full-board evaluation from `ai_role`'s point of view.
///
/// Every run is scored once, from its first stone along the axis. The
/// opponent's total is weighted more heavily unless `skip_defense` is set.
pub fn static_evaluate(board: &Board, ai_role: Role, skip_defense: bool) -> i64 {
  let mut ai = SideTally::default();
  let mut opp = SideTally::default();

  for y in 0..SIZE as i32 {
    for x in 0..SIZE as i32 {
      let role = match board.get(x, y) {
        Cell::Black => Role::Black,
        Cell::White => Role::White,
        _ => continue,
      };
      let tally = if role == ai_role { &mut ai } else { &mut opp };

      for &(dx, dy) in DIRECTIONS.iter() {
        if board.get(x - dx, y - dy) == role.cell() {
          continue;
        }
        let (count, open_ends) = count_line(board, x, y, dx, dy, role);
        tally.score += Scores::get(Shape::from_line(count, open_ends));
        tally.score += jump_pattern_score(board, x, y, dx, dy, role);
        if count == 3 && open_ends == 2 {
          tally.open_threes += 1;
        }
        if count == 4 {
          tally.fours += 1;
        }
      }
    }
  }

  let weight = if skip_defense {
    RELAXED_DEFENSE_WEIGHT_TENTHS
  } else {
    DEFENSE_WEIGHT_TENTHS
  };
  ai.with_combinations() - opp.with_combinations() * weight / 10
}

#[cfg(test)]
mod tests {
  use super::*;

  fn board_with(black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for &(x, y) in black {
      board.set(x, y, Role::Black);
    }
    for &(x, y) in white {
      board.set(x, y, Role::White);
    }
    board
  }

  #[test]
  fn test_position_score_tiers() {
    let mut board = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[]);
    let five = position_score(&mut board, 9, 7, Role::Black);
    assert!(five >= Scores::get(Shape::FIVE));

    let mut board = board_with(&[(5, 7), (6, 7), (7, 7)], &[]);
    let open_four = position_score(&mut board, 8, 7, Role::Black);
    assert!(open_four >= Scores::get(Shape::OPEN_FOUR));
    assert!(open_four < Scores::get(Shape::FIVE));

    let lonely = position_score(&mut board, 0, 14, Role::Black);
    assert_eq!(lonely, 4 * Scores::get(Shape::ONE));
    assert_eq!(position_score(&mut board, 5, 7, Role::White), 0);
  }

  #[test]
  fn test_dead_run_scores_as_closed_for_placement() {
    let mut board = board_with(&[(5, 7), (6, 7), (7, 7)], &[(4, 7), (9, 7)]);
    let score = position_score(&mut board, 8, 7, Role::Black);
    assert_eq!(score, Scores::get(Shape::CLOSED_FOUR) + 3 * Scores::get(Shape::ONE));
  }

  #[test]
  fn test_urgency_prefers_blocking_and_center() {
    let mut board = board_with(&[(0, 0)], &[(5, 7), (6, 7), (7, 7), (8, 7)]);
    let block = move_urgency(&mut board, 9, 7, Role::Black, Role::White);
    let quiet = move_urgency(&mut board, 3, 3, Role::Black, Role::White);
    assert!(block > quiet);
    assert_eq!(move_urgency(&mut board, 5, 7, Role::Black, Role::White), i64::MIN);

    let mut empty = Board::new();
    let center = move_urgency(&mut empty, 7, 7, Role::Black, Role::White);
    let corner = move_urgency(&mut empty, 0, 0, Role::Black, Role::White);
    assert_eq!(center - corner, 28);
  }

  #[test]
  fn test_jump_patterns() {
    let board = board_with(&[(5, 7), (7, 7), (8, 7)], &[]);
    assert_eq!(jump_pattern_score(&board, 7, 7, 1, 0, Role::Black), Scores::get(Shape::JUMP_THREE));
    let board = board_with(&[(5, 7), (8, 7)], &[]);
    assert_eq!(jump_pattern_score(&board, 5, 7, 1, 0, Role::Black), Scores::get(Shape::JUMP_TWO));
    assert_eq!(jump_pattern_score(&board, 5, 7, 0, 1, Role::Black), 0);
  }

  #[test]
  fn test_static_evaluate_is_relative() {
    let board = board_with(&[(6, 7), (7, 7), (8, 7)], &[(0, 0)]);
    let black_view = static_evaluate(&board, Role::Black, false);
    let white_view = static_evaluate(&board, Role::White, false);
    assert!(black_view > 0);
    assert!(white_view < 0);
  }

  #[test]
  fn test_static_evaluate_defense_weight() {
    let board = board_with(&[], &[(6, 7), (7, 7), (8, 7)]);
    let strict = static_evaluate(&board, Role::Black, false);
    let relaxed = static_evaluate(&board, Role::Black, true);
    assert!(strict < relaxed);
    assert_eq!(strict, relaxed * 3);
  }

  #[test]
  fn test_static_evaluate_double_four_bonus() {
    let single = board_with(&[(3, 3), (4, 3), (5, 3), (6, 3)], &[]);
    let double = board_with(&[(3, 3), (4, 3), (5, 3), (6, 3), (3, 9), (4, 9), (5, 9), (6, 9)], &[]);
    let one = static_evaluate(&single, Role::Black, false);
    let two = static_evaluate(&double, Role::Black, false);
    assert!(two - 2 * one >= Scores::get(Shape::DOUBLE_FOUR));
  }
}
