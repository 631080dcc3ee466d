//! Threat checks for the tactical stages of the search, and whole-board
//! finders for the cells that neutralize an opponent's broken four or open three.

use crate::board::{Board, DIRECTIONS, SIZE};
use crate::eval::count_line;
use crate::player::Role;
use crate::rules::line_window;
use crate::scores::Scores;
use crate::shapes::{self, Shape, BROKEN_THREE_BLOCKS, JUMP_FOURS};

// Window half-width used by the block finders; the stone sits at index 6
const SPAN: i32 = 6;

/// (run length, open ends) on every axis once `role` sits on (x, y).
fn lines_after(board: &mut Board, x: i32, y: i32, role: Role) -> [(usize, u8); 4] {
  board.with_stone(x, y, role, |b| DIRECTIONS.map(|(dx, dy)| count_line(b, x, y, dx, dy, role)))
}

/// Does the stone already at (x, y) sit in a contiguous open four?
pub fn is_open_four_at(board: &Board, x: i32, y: i32, role: Role) -> bool {
  DIRECTIONS.iter().any(|&(dx, dy)| count_line(board, x, y, dx, dy, role) == (4, 2))
}

pub fn creates_open_four(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  lines_after(board, x, y, role).iter().any(|&line| line == (4, 2))
}

/// A four (any openness) together with an open three on another axis.
pub fn creates_four_three(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  let lines = lines_after(board, x, y, role);
  let four = lines.iter().any(|&(count, _)| count >= 4);
  let open_three = lines.iter().any(|&line| line == (3, 2));
  four && open_three
}

pub fn creates_double_three(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  lines_after(board, x, y, role).iter().filter(|&&line| line == (3, 2)).count() >= 2
}

pub fn creates_open_three(board: &mut Board, x: i32, y: i32, role: Role) -> bool {
  lines_after(board, x, y, role).iter().any(|&line| line == (3, 2))
}

fn offset_pos(board: &Board, x: i32, y: i32, dx: i32, dy: i32, offset: i32) -> Option<(usize, usize)> {
  let (nx, ny) = (x + offset * dx, y + offset * dy);
  if board.is_empty(nx, ny) {
    Some((nx as usize, ny as usize))
  } else {
    None
  }
}

/// Gap of the first broken four (`S.SSS`, `SS.SS`, `SSS.S`) on the axis.
fn jump_four_gap(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> Option<(usize, usize)> {
  let window = line_window(board, x, y, dx, dy, SPAN);
  for (pattern, gap) in JUMP_FOURS.iter() {
    for start in shapes::match_starts(&window, pattern, role) {
      let offset = (start + gap) as i32 - SPAN;
      if let Some(pos) = offset_pos(board, x, y, dx, dy, offset) {
        return Some(pos);
      }
    }
  }
  None
}

/// Gap cells of every broken four `target` has on the board, deduplicated.
pub fn find_jump_four_blocks(board: &Board, target: Role) -> Vec<(usize, usize)> {
  let mut blocks = Vec::new();
  for y in 0..SIZE as i32 {
    for x in 0..SIZE as i32 {
      if board.get(x, y) != target.cell() {
        continue;
      }
      for &(dx, dy) in DIRECTIONS.iter() {
        if let Some(pos) = jump_four_gap(board, x, y, dx, dy, target) {
          if !blocks.contains(&pos) {
            blocks.push(pos);
          }
        }
      }
    }
  }
  blocks
}

/// A cell that stops an open three, with the weight of the threat it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatBlock {
  pub x: usize,
  pub y: usize,
  pub threat: i64,
}

/// Block cells for the three through (x, y) on one axis, if it is open.
///
/// An exact contiguous three with both ends empty yields both ends plus the
/// empty cells one further out. Otherwise the first `.S.SS.` / `.SS.S.` in
/// the window yields its empty cells.
fn open_three_blocks(board: &Board, x: i32, y: i32, dx: i32, dy: i32, role: Role) -> Option<(Vec<(usize, usize)>, i64)> {
  let target = role.cell();

  let mut forward = 1;
  while board.get(x + forward * dx, y + forward * dy) == target {
    forward += 1;
  }
  let mut backward = 1;
  while board.get(x - backward * dx, y - backward * dy) == target {
    backward += 1;
  }
  let length = forward + backward - 1;

  let after = offset_pos(board, x, y, dx, dy, forward);
  let before = offset_pos(board, x, y, dx, dy, -backward);
  if length == 3 {
    if let (Some(before), Some(after)) = (before, after) {
      let mut positions = vec![before, after];
      positions.extend(offset_pos(board, x, y, dx, dy, -backward - 1));
      positions.extend(offset_pos(board, x, y, dx, dy, forward + 1));
      return Some((positions, Scores::get(Shape::OPEN_THREE)));
    }
  }

  let window = line_window(board, x, y, dx, dy, SPAN);
  for (pattern, block_idx) in BROKEN_THREE_BLOCKS.iter() {
    if let Some(start) = shapes::find(&window, pattern, role) {
      let positions: Vec<(usize, usize)> = block_idx
        .iter()
        .filter_map(|&i| offset_pos(board, x, y, dx, dy, (start + i) as i32 - SPAN))
        .collect();
      if !positions.is_empty() {
        return Some((positions, Scores::get(Shape::JUMP_THREE)));
      }
    }
  }
  None
}

/// Cells that stop `target`'s open threes, most dangerous first.
pub fn find_open_three_blocks(board: &Board, target: Role) -> Vec<ThreatBlock> {
  let mut blocks: Vec<ThreatBlock> = Vec::new();
  for y in 0..SIZE as i32 {
    for x in 0..SIZE as i32 {
      if board.get(x, y) != target.cell() {
        continue;
      }
      for &(dx, dy) in DIRECTIONS.iter() {
        let Some((positions, threat)) = open_three_blocks(board, x, y, dx, dy, target) else {
          continue;
        };
        for (bx, by) in positions {
          if !blocks.iter().any(|b| b.x == bx && b.y == by) {
            blocks.push(ThreatBlock { x: bx, y: by, threat });
          }
        }
      }
    }
  }
  blocks.sort_by(|a, b| b.threat.cmp(&a.threat));
  blocks
}
