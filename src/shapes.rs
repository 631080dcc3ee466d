use crate::player::{Cell, Role};

/// Pattern categories the evaluator scores.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
  FIVE,
  VCF_WIN,

  OPEN_FOUR,
  DOUBLE_FOUR,
  FOUR_THREE,
  CLOSED_FOUR,
  DEAD_FOUR,

  DOUBLE_THREE,
  OPEN_THREE,
  JUMP_THREE,
  CLOSED_THREE,
  DEAD_THREE,

  OPEN_TWO,
  JUMP_TWO,
  CLOSED_TWO,
  DEAD_TWO,

  ONE,
}

impl Shape {
  /// Classify a contiguous run by its length and number of open ends.
  pub fn from_line(count: usize, open_ends: u8) -> Shape {
    match (count, open_ends) {
      (c, _) if c >= 5 => Shape::FIVE,
      (4, 2) => Shape::OPEN_FOUR,
      (4, 1) => Shape::CLOSED_FOUR,
      (4, _) => Shape::DEAD_FOUR,
      (3, 2) => Shape::OPEN_THREE,
      (3, 1) => Shape::CLOSED_THREE,
      (3, _) => Shape::DEAD_THREE,
      (2, 2) => Shape::OPEN_TWO,
      (2, 1) => Shape::CLOSED_TWO,
      (2, _) => Shape::DEAD_TWO,
      _ => Shape::ONE,
    }
  }
}

/// One position of a fixed-window line pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  // Empty cell
  E,
  // Stone of the color being matched
  S,
}

use Slot::{E, S};

pub const OPEN_FOUR: &[Slot] = &[E, S, S, S, S, E];

// Threes that become an open four with one more stone
pub const OPEN_THREES: [&[Slot]; 3] = [&[E, S, S, S, E], &[E, S, S, E, S, E], &[E, S, E, S, S, E]];

pub const JUMP_THREES: [&[Slot]; 3] = [&[E, S, E, S, S, E], &[E, S, S, E, S, E], &[E, S, E, S, E, S, E]];

pub const JUMP_TWOS: [&[Slot]; 2] = [&[E, S, E, E, S, E], &[E, S, E, S, E, E]];

// Broken fours with the index of their gap
pub const JUMP_FOURS: [(&[Slot], usize); 3] = [(&[S, E, S, S, S], 1), (&[S, S, E, S, S], 2), (&[S, S, S, E, S], 3)];

// Broken threes with the offsets that neutralize them
pub const BROKEN_THREE_BLOCKS: [(&[Slot], [usize; 3]); 2] = [(&[E, S, E, S, S, E], [0, 2, 5]), (&[E, S, S, E, S, E], [0, 3, 5])];

fn slot_matches(cell: Cell, slot: Slot, role: Role) -> bool {
  match slot {
    Slot::E => cell == Cell::Empty,
    Slot::S => cell == role.cell(),
  }
}

/// Does `pattern` match `window` starting at `start`?
pub fn matches_at(window: &[Cell], start: usize, pattern: &[Slot], role: Role) -> bool {
  start + pattern.len() <= window.len()
    && pattern
      .iter()
      .zip(&window[start..start + pattern.len()])
      .all(|(&slot, &cell)| slot_matches(cell, slot, role))
}

/// Every start index where `pattern` matches inside `window`, left to right.
pub fn match_starts<'a>(window: &'a [Cell], pattern: &'a [Slot], role: Role) -> impl Iterator<Item = usize> + 'a {
  let last = window.len().saturating_sub(pattern.len());
  (0..=last).filter(move |&start| matches_at(window, start, pattern, role))
}

/// First start index where `pattern` matches inside `window`.
pub fn find(window: &[Cell], pattern: &[Slot], role: Role) -> Option<usize> {
  match_starts(window, pattern, role).next()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn window(s: &str) -> Vec<Cell> {
    s.chars().map(|c| Cell::from_symbol(c).unwrap_or(Cell::Wall)).collect()
  }

  #[test]
  fn test_from_line_table() {
    assert_eq!(Shape::from_line(6, 0), Shape::FIVE);
    assert_eq!(Shape::from_line(4, 2), Shape::OPEN_FOUR);
    assert_eq!(Shape::from_line(4, 0), Shape::DEAD_FOUR);
    assert_eq!(Shape::from_line(3, 1), Shape::CLOSED_THREE);
    assert_eq!(Shape::from_line(2, 2), Shape::OPEN_TWO);
    assert_eq!(Shape::from_line(1, 2), Shape::ONE);
  }

  #[test]
  fn test_find_respects_color_and_walls() {
    let w = window("X.BBBB.W");
    assert_eq!(find(&w, OPEN_FOUR, Role::Black), Some(1));
    assert_eq!(find(&w, OPEN_FOUR, Role::White), None);
    // Wall never counts as empty
    let w = window("XBBBB.");
    assert_eq!(find(&w, OPEN_FOUR, Role::Black), None);
  }

  #[test]
  fn test_match_starts_finds_overlapping() {
    let w = window(".B.B.B.");
    let starts: Vec<usize> = match_starts(&w, &[E, S, E], Role::Black).collect();
    assert_eq!(starts, vec![0, 2, 4]);
  }

  #[test]
  fn test_short_window_never_matches() {
    let w = window(".B.");
    assert_eq!(find(&w, OPEN_FOUR, Role::Black), None);
  }
}
