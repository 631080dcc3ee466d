//! Renju rules: five detection and Black's forbidden moves.
//!
//! Black may not make an overline (six or more), a double-three, or a
//! double-four. White is unrestricted and wins with five or more.
//!
//! Helpers that "simulate" a stone take `&mut Board` and go through
//! `Board::with_stone`, so the board is always handed back unchanged.

use crate::board::{Board, DIRECTIONS};
use crate::error::{Forbidden, MoveError};
use crate::player::{Cell, Role};
use crate::shapes::{self, OPEN_FOUR, OPEN_THREES};

// Half-width of the window used by the open-three/open-four tests
const LINE_SPAN: i32 = 6;

/// Stones of `role` walking from (x, y) in the (dx, dy) direction, origin excluded.
fn walk(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> (usize, Cell) {
  let target = role.cell();
  let mut count = 0;
  let (mut nx, mut ny) = (x + dx, y + dy);
  while board.get(nx, ny) == target {
    count += 1;
    nx += dx;
    ny += dy;
  }
  (count, board.get(nx, ny))
}

/// 1 + same-colored stones extending both ways along the axis.
pub fn run_length(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> usize {
  let (forward, _) = walk(board, x, y, dx, dy, role);
  let (backward, _) = walk(board, x, y, -dx, -dy, role);
  1 + forward + backward
}

/// Run length plus the number of open ends (0..=2) in one pass.
/// An end is open when the first cell past the run is on the board and empty.
pub fn line_open_ends(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> (usize, u8) {
  let (forward, after) = walk(board, x, y, dx, dy, role);
  let (backward, before) = walk(board, x, y, -dx, -dy, role);
  let open_ends = (after == Cell::Empty) as u8 + (before == Cell::Empty) as u8;
  (1 + forward + backward, open_ends)
}

/// Cells from -span to +span along the axis, walls included.
pub fn line_window(board: &Board, x: i32, y: i32, dx: i32, dy: i32, span: i32) -> Vec<Cell> {
  (-span..=span).map(|k| board.get(x + k * dx, y + k * dy)).collect()
}

/// Is the stone at (x, y) a winning one?
///
/// White wins with any run of five or more. Black needs an exact five and
/// no overline on any axis through the stone.
pub fn check_win(board: &Board, x: i32, y: i32, role: Role) -> bool {
  match role {
    Role::White => DIRECTIONS.iter().any(|&(dx, dy)| run_length(board, x, y, dx, dy, role) >= 5),
    Role::Black => {
      let mut exact = false;
      for &(dx, dy) in DIRECTIONS.iter() {
        let run = run_length(board, x, y, dx, dy, role);
        if run >= 6 {
          return false;
        }
        if run == 5 {
          exact = true;
        }
      }
      exact
    }
  }
}

/// Whole-board scan for five or more of `role` in a row.
pub fn has_five_anywhere(board: &Board, role: Role) -> bool {
  let target = role.cell();
  for y in 0..board_size() {
    for x in 0..board_size() {
      if board.get(x, y) != target {
        continue;
      }
      if DIRECTIONS.iter().any(|&(dx, dy)| run_length(board, x, y, dx, dy, role) >= 5) {
        return true;
      }
    }
  }
  false
}

fn board_size() -> i32 {
  crate::board::SIZE as i32
}

/// Would a stone at the empty (x, y) make six or more? Always false for White.
pub fn would_overline(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  if role != Role::Black || !board.is_empty(x, y) {
    return false;
  }
  board.with_stone(x, y, role, |b| {
    DIRECTIONS.iter().any(|&(dx, dy)| run_length(b, x, y, dx, dy, role) >= 6)
  })
}

/// Does the axis through (x, y) contain `.SSSS.` with no same-colored stone
/// directly outside it?
pub fn has_open_four(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> bool {
  let window = line_window(board, x, y, dx, dy, LINE_SPAN);
  let target = role.cell();
  let found = shapes::match_starts(&window, OPEN_FOUR, role).any(|idx| {
    let left_ok = idx == 0 || window[idx - 1] != target;
    let right_ok = window.get(idx + OPEN_FOUR.len()).map_or(true, |&c| c != target);
    left_ok && right_ok
  });
  found
}

/// Open-three test for the axis through (x, y).
///
/// Holds when one more stone on an empty cell of the axis (within five of
/// the origin) makes an open four, or when the window already shows
/// `.SSS.`, `.SS.S.` or `.S.SS.`.
pub fn has_open_three(board: &mut Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> bool {
  let window = line_window(board, x, y, dx, dy, LINE_SPAN);

  for t in -5..=5 {
    let (nx, ny) = (x + t * dx, y + t * dy);
    if !board.is_empty(nx, ny) {
      continue;
    }
    if board.with_stone(nx, ny, role, |b| has_open_four(b, nx, ny, dx, dy, role)) {
      return true;
    }
  }

  OPEN_THREES.iter().any(|pattern| shapes::find(&window, pattern, role).is_some())
}

/// Number of axes showing an open four once `role` is placed at (x, y).
pub fn count_open_four_axes(board: &mut Board, x: i32, y: i32, role: Role) -> usize {
  if !board.is_empty(x, y) {
    return 0;
  }
  board.with_stone(x, y, role, |b| {
    DIRECTIONS
      .iter()
      .filter(|&&(dx, dy)| has_open_four(b, x, y, dx, dy, role))
      .count()
  })
}

pub fn is_forbidden_double_three(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  if role != Role::Black || !board.is_empty(x, y) {
    return false;
  }
  board.with_stone(x, y, role, |b| {
    let mut axes = 0;
    for &(dx, dy) in DIRECTIONS.iter() {
      if has_open_three(b, x, y, dx, dy, role) {
        axes += 1;
        if axes >= 2 {
          return true;
        }
      }
    }
    false
  })
}

pub fn is_forbidden_double_four(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  role == Role::Black && count_open_four_axes(board, x, y, role) >= 2
}

/// Which rule, if any, a stone at the empty (x, y) would break.
pub fn forbidden_reason(board: &mut Board, x: i32, y: i32, role: Role) -> Option<Forbidden> {
  if role != Role::Black {
    return None;
  }
  if would_overline(board, x, y, role) {
    Some(Forbidden::Overline)
  } else if is_forbidden_double_three(board, x, y, role) {
    Some(Forbidden::DoubleThree)
  } else if is_forbidden_double_four(board, x, y, role) {
    Some(Forbidden::DoubleFour)
  } else {
    None
  }
}

/// Black only: occupied, overline, double-three or double-four.
pub fn is_forbidden_move(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  if role != Role::Black {
    return false;
  }
  !board.is_empty(x, y) || forbidden_reason(board, x, y, role).is_some()
}

/// Legality gate with the reason for a refusal.
pub fn check_move(board: &mut Board, x: i32, y: i32, role: Role) -> Result<(), MoveError> {
  if !board.in_bounds(x, y) {
    return Err(MoveError::OutOfBounds { x, y });
  }
  let (ux, uy) = (x as usize, y as usize);
  if !board.is_empty(x, y) {
    return Err(MoveError::Occupied { x: ux, y: uy });
  }
  match forbidden_reason(board, x, y, role) {
    Some(reason) => Err(MoveError::Forbidden { x: ux, y: uy, reason }),
    None => Ok(()),
  }
}

pub fn is_valid_move(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  check_move(board, x, y, role).is_ok()
}
