//! Victory by Continuous Fours (VCF) solver
//!
//! Proves a forced win using only four-threats: every attacker move must
//! make a four, every forced reply must still lose, and the line ends in a
//! five or an open four. Each branch works on its own copy of the board.

use crate::board::{Board, CELLS, DIRECTIONS, SIZE};
use crate::cache::Cache;
use crate::deadline::Deadline;
use crate::eval::count_line;
use crate::player::{Cell, Role};
use crate::rules;
use crate::threats;
use log::debug;

// Each entry holds its key twice (map and eviction queue)
const MEMO_CAPACITY: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
  Attacker,
  Defender,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct VcfKey {
  cells: [Cell; CELLS],
  attacker: Role,
  depth: i32,
  side: Side,
}

impl VcfKey {
  fn new(board: &Board, attacker: Role, depth: i32, side: Side) -> Self {
    Self {
      cells: *board.cells(),
      attacker,
      depth,
      side,
    }
  }
}

/// One forced-win search. The memo lives as long as the solver and is
/// emptied at the start of every `solve`.
pub struct VcfSolver {
  deadline: Deadline,
  // Attacker nodes store the winning four, defender nodes the saving block
  memo: Cache<VcfKey, Option<(usize, usize)>>,
  nodes: u64,
}

impl VcfSolver {
  pub fn new(deadline: Deadline) -> Self {
    Self {
      deadline,
      memo: Cache::new(MEMO_CAPACITY),
      nodes: 0,
    }
  }

  /// First move of a forced win for `attacker` within `depth` plies, if any.
  /// Running out of time yields `None`, never an error.
  pub fn solve(&mut self, board: &Board, attacker: Role, depth: i32) -> Option<(usize, usize)> {
    self.memo.clear();
    self.nodes = 0;
    let found = self.attack(board, attacker, depth);
    debug!(
      "vcf {:?} depth {}: {:?} after {} nodes{}",
      attacker,
      depth,
      found,
      self.nodes,
      if self.deadline.is_expired() { " (timeout)" } else { "" }
    );
    found
  }

  pub fn nodes(&self) -> u64 {
    self.nodes
  }

  pub fn timed_out(&self) -> bool {
    self.deadline.is_expired()
  }

  fn attack(&mut self, board: &Board, attacker: Role, depth: i32) -> Option<(usize, usize)> {
    if depth <= 0 || self.deadline.poll() {
      return None;
    }
    self.nodes += 1;

    let key = VcfKey::new(board, attacker, depth, Side::Attacker);
    if let Some(&hit) = self.memo.get(&key) {
      return hit;
    }

    let mut work = board.clone();
    let mut found = None;
    for (x, y) in four_moves(&mut work, attacker) {
      let (ix, iy) = (x as i32, y as i32);
      if !rules::is_valid_move(&mut work, ix, iy, attacker) {
        continue;
      }

      let mut next = board.clone();
      next.set(x, y, attacker);
      if rules::check_win(&next, ix, iy, attacker) || threats::is_open_four_at(&next, ix, iy, attacker) {
        found = Some((x, y));
        break;
      }

      let blocks = must_block_moves(&mut next, attacker);
      if blocks.is_empty() {
        // the four can be ignored
        continue;
      }
      if self.refute(&next, attacker, depth, &blocks).is_none() {
        found = Some((x, y));
        break;
      }
    }

    self.memo.put(key, found);
    found
  }

  /// A forced reply that survives, or `None` when every reply loses.
  fn refute(&mut self, board: &Board, attacker: Role, depth: i32, blocks: &[(usize, usize)]) -> Option<(usize, usize)> {
    let key = VcfKey::new(board, attacker, depth, Side::Defender);
    if let Some(&hit) = self.memo.get(&key) {
      return hit;
    }

    let defender = attacker.opponent();
    let mut saving = None;
    for &(bx, by) in blocks {
      if !board.is_empty(bx as i32, by as i32) {
        continue;
      }
      let mut after = board.clone();
      after.set(bx, by, defender);
      if rules::check_win(&after, bx as i32, by as i32, defender) || self.attack(&after, attacker, depth - 2).is_none() {
        saving = Some((bx, by));
        break;
      }
    }

    self.memo.put(key, saving);
    saving
  }
}

/// Candidate cells where `role` makes four or more in a row, open fours first.
pub fn four_moves(board: &mut Board, role: Role) -> Vec<(usize, usize)> {
  let mut moves: Vec<((usize, usize), u32)> = Vec::new();
  for (x, y) in board.candidate_moves(2) {
    let (ix, iy) = (x as i32, y as i32);
    if !board.is_empty(ix, iy) {
      continue;
    }
    let makes_four = board.with_stone(ix, iy, role, |b| {
      DIRECTIONS.iter().any(|&(dx, dy)| count_line(b, ix, iy, dx, dy, role).0 >= 4)
    });
    if makes_four {
      let priority = if threats::creates_open_four(board, ix, iy, role) { 100 } else { 1 };
      moves.push(((x, y), priority));
    }
  }
  moves.sort_by(|a, b| b.1.cmp(&a.1));
  moves.into_iter().map(|(pos, _)| pos).collect()
}

/// Every empty cell where `attacker` would complete five, scanning the whole board.
pub fn must_block_moves(board: &mut Board, attacker: Role) -> Vec<(usize, usize)> {
  let mut blocks = Vec::new();
  for y in 0..SIZE as i32 {
    for x in 0..SIZE as i32 {
      if !board.is_empty(x, y) {
        continue;
      }
      let wins = board.with_stone(x, y, attacker, |b| {
        DIRECTIONS.iter().any(|&(dx, dy)| count_line(b, x, y, dx, dy, attacker).0 >= 5)
      });
      if wins {
        blocks.push((x as usize, y as usize));
      }
    }
  }
  blocks
}
