//! Move selection.
//!
//! `AIEngine::decide` walks a fixed priority ladder (opening book, early
//! center play, immediate tactics, forced wins, threat creation) and only
//! falls through to a depth-limited alpha-beta search when nothing tactical
//! applies. Every search runs under the difficulty's time budget.

use crate::board::{Board, Move, CENTER, SIZE};
use crate::deadline::Deadline;
use crate::difficulty::{Difficulty, DifficultyConfig};
use crate::eval;
use crate::player::Role;
use crate::rules;
use crate::scores::Scores;
use crate::shapes::Shape;
use crate::threats;
use crate::vcf::VcfSolver;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Larger than any evaluation.
pub const MAX: i64 = 1_000_000_000_000;

const CANDIDATE_RADIUS: i32 = 2;
const MINIMAX_CADENCE: u64 = 1000;
const VCF_CADENCE: u64 = 64;
const VCF_BUDGET_PERCENT: u32 = 30;
const MIN_NODE_CANDIDATES: usize = 12;
const RANDOM_POOL: usize = 4;

const EARLY_GAME_MOVES: usize = 5;
const EARLY_URGENCY_THRESHOLD: i64 = 5000;

// Chance that a weak-defense engine ignores the threat
const SKIP_FIVE_BLOCK_CHANCE: f64 = 0.25;
const SKIP_OPEN_FOUR_BLOCK_CHANCE: f64 = 0.4;

const CENTER_DIAGONALS: [(usize, usize); 4] = [(6, 6), (6, 8), (8, 6), (8, 8)];

// Black's second stone: (opponent reply to look for, counter-placement)
const SECOND_MOVE_BOOK: [((usize, usize), (usize, usize)); 8] = [
  ((6, 6), (8, 8)),
  ((6, 8), (8, 6)),
  ((8, 6), (6, 8)),
  ((8, 8), (6, 6)),
  ((6, 7), (8, 7)),
  ((8, 7), (6, 7)),
  ((7, 6), (7, 8)),
  ((7, 8), (7, 6)),
];

/// Which rung of the ladder produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Opening,
  EarlyCenter,
  Win,
  BlockFive,
  OpenFour,
  BlockOpenFour,
  BlockJumpFour,
  BlockOpenThree,
  Vcf,
  BlockVcf,
  FourThree,
  BlockFourThree,
  DoubleThree,
  OpenThree,
  Minimax,
  RandomDeviation,
  Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct Decision {
  pub mv: Move,
  pub stage: Stage,
}

impl Decision {
  fn new(mv: Move, stage: Stage) -> Self {
    Self { mv, stage }
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
  pub nodes: u64,
  pub elapsed_ms: u128,
  pub timed_out: bool,
}

pub struct AIEngine {
  pub config: DifficultyConfig,
  label: &'static str,
  rng: StdRng,
  deadline: Deadline,
  nodes: u64,
  pub stats: SearchStats,
}

impl AIEngine {
  pub fn new(difficulty: Difficulty) -> Self {
    Self::with_config(difficulty.config(), StdRng::from_entropy()).labelled(difficulty.name())
  }

  /// Reproducible engine: every random choice comes from `seed`.
  pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
    Self::with_config(difficulty.config(), StdRng::seed_from_u64(seed)).labelled(difficulty.name())
  }

  pub fn with_config(config: DifficultyConfig, rng: StdRng) -> Self {
    Self {
      config,
      label: "custom",
      rng,
      deadline: Deadline::new(config.time_limit, MINIMAX_CADENCE),
      nodes: 0,
      stats: SearchStats::default(),
    }
  }

  fn labelled(mut self, label: &'static str) -> Self {
    self.label = label;
    self
  }

  /// The engine's move for `role`. Always in bounds; legal whenever a legal move exists.
  pub fn choose_move(&mut self, board: &Board, role: Role) -> Move {
    self.decide(board, role).mv
  }

  /// Like `choose_move`, also reporting which stage picked the move.
  pub fn decide(&mut self, board: &Board, role: Role) -> Decision {
    self.deadline = Deadline::new(self.config.time_limit, MINIMAX_CADENCE);
    self.nodes = 0;

    let decision = self.run_ladder(board, role);

    self.stats = SearchStats {
      nodes: self.nodes,
      elapsed_ms: self.deadline.elapsed().as_millis(),
      timed_out: self.deadline.is_expired(),
    };
    info!(
      "AI[{}]: {} nodes, {}ms, best: ({}, {}) score: {:?} via {:?}{}",
      self.label,
      self.stats.nodes,
      self.stats.elapsed_ms,
      decision.mv.x,
      decision.mv.y,
      decision.mv.score,
      decision.stage,
      if self.stats.timed_out { " (timeout)" } else { "" }
    );
    decision
  }

  fn run_ladder(&mut self, board: &Board, role: Role) -> Decision {
    let opp = role.opponent();
    let mut work = board.clone();
    let move_count = board.move_count();
    let scored = |x: usize, y: usize, shape: Shape, adjust: i64| Move::scored(x, y, role, Scores::get(shape) + adjust);

    if let Some((x, y)) = self.opening_move(board, role, move_count) {
      return Decision::new(Move::new(x, y, role), Stage::Opening);
    }

    if move_count < EARLY_GAME_MOVES {
      if let Some((x, y)) = early_center_move(&mut work, role) {
        return Decision::new(Move::new(x, y, role), Stage::EarlyCenter);
      }
    }

    let candidates = sorted_candidates(&mut work, role);

    for &(x, y) in &candidates {
      if is_valid(&mut work, x, y, role) && wins_at(board, x, y, role) {
        return Decision::new(scored(x, y, Shape::FIVE, 0), Stage::Win);
      }
    }

    if self.defends(SKIP_FIVE_BLOCK_CHANCE) {
      for &(x, y) in &candidates {
        if work.is_empty(x as i32, y as i32) && wins_at(board, x, y, opp) && is_valid(&mut work, x, y, role) {
          debug!("blocking five at ({}, {})", x, y);
          return Decision::new(scored(x, y, Shape::FIVE, -1), Stage::BlockFive);
        }
      }
    }

    for &(x, y) in &candidates {
      if is_valid(&mut work, x, y, role) && threats::creates_open_four(&mut work, x as i32, y as i32, role) {
        return Decision::new(scored(x, y, Shape::OPEN_FOUR, 0), Stage::OpenFour);
      }
    }

    if self.defends(SKIP_OPEN_FOUR_BLOCK_CHANCE) {
      for &(x, y) in &candidates {
        if work.is_empty(x as i32, y as i32)
          && threats::creates_open_four(&mut work, x as i32, y as i32, opp)
          && is_valid(&mut work, x, y, role)
        {
          debug!("blocking open four at ({}, {})", x, y);
          return Decision::new(scored(x, y, Shape::OPEN_FOUR, -1), Stage::BlockOpenFour);
        }
      }
    }

    if !self.config.skip_defense {
      if let Some(decision) = self.block_threats(&mut work, board, role) {
        return decision;
      }
    }

    if self.config.vcf_depth > 0 {
      let mut solver = VcfSolver::new(self.deadline.share(VCF_BUDGET_PERCENT, VCF_CADENCE));
      let mine = solver.solve(board, role, self.config.vcf_depth);
      self.nodes += solver.nodes();
      if let Some((x, y)) = mine {
        return Decision::new(scored(x, y, Shape::VCF_WIN, 0), Stage::Vcf);
      }

      if !self.config.skip_defense {
        let theirs = solver.solve(board, opp, self.config.vcf_depth);
        self.nodes += solver.nodes();
        if let Some((x, y)) = theirs {
          if is_valid(&mut work, x, y, role) {
            debug!("occupying the opponent's forced-win square ({}, {})", x, y);
            return Decision::new(scored(x, y, Shape::VCF_WIN, -1), Stage::BlockVcf);
          }
        }
      }
    }

    for &(x, y) in &candidates {
      if is_valid(&mut work, x, y, role) && threats::creates_four_three(&mut work, x as i32, y as i32, role) {
        return Decision::new(scored(x, y, Shape::OPEN_FOUR, -100), Stage::FourThree);
      }
    }

    if !self.config.skip_defense {
      for &(x, y) in &candidates {
        if work.is_empty(x as i32, y as i32)
          && threats::creates_four_three(&mut work, x as i32, y as i32, opp)
          && is_valid(&mut work, x, y, role)
        {
          return Decision::new(scored(x, y, Shape::OPEN_FOUR, -200), Stage::BlockFourThree);
        }
      }
    }

    // Black may not make a double-three
    if role == Role::White {
      for &(x, y) in &candidates {
        if is_valid(&mut work, x, y, role) && threats::creates_double_three(&mut work, x as i32, y as i32, role) {
          return Decision::new(scored(x, y, Shape::DOUBLE_THREE, 0), Stage::DoubleThree);
        }
      }
    }

    let mut dominated: Option<bool> = None;
    for &(x, y) in &candidates {
      if !is_valid(&mut work, x, y, role) || !threats::creates_open_three(&mut work, x as i32, y as i32, role) {
        continue;
      }
      let opponent_strikes = *dominated.get_or_insert_with(|| has_strong_reply(&mut work, &candidates, opp));
      if !opponent_strikes {
        return Decision::new(scored(x, y, Shape::OPEN_THREE, 0), Stage::OpenThree);
      }
    }

    self.search(board, &mut work, &candidates, role)
  }

  /// Opening book for the first three stones of the game.
  fn opening_move(&mut self, board: &Board, role: Role, move_count: usize) -> Option<(usize, usize)> {
    let center = CENTER as i32;
    match move_count {
      0 => Some((CENTER, CENTER)),
      1 if board.is_empty(center, center) => Some((CENTER, CENTER)),
      1 => Some(CENTER_DIAGONALS[self.rng.gen_range(0..CENTER_DIAGONALS.len())]),
      2 if role == Role::Black && !board.is_empty(center, center) => SECOND_MOVE_BOOK
        .iter()
        .find(|&&((cx, cy), (px, py))| !board.is_empty(cx as i32, cy as i32) && board.is_empty(px as i32, py as i32))
        .map(|&(_, play)| play),
      _ => None,
    }
  }

  /// Roll for whether a weak-defense engine bothers to answer a threat.
  fn defends(&mut self, skip_chance: f64) -> bool {
    !self.config.skip_defense || self.rng.gen::<f64>() > skip_chance
  }

  /// Broken fours first, then open threes, preferring blocks that also attack.
  fn block_threats(&mut self, work: &mut Board, board: &Board, role: Role) -> Option<Decision> {
    let opp = role.opponent();

    for (x, y) in threats::find_jump_four_blocks(board, opp) {
      if is_valid(work, x, y, role) {
        debug!("blocking broken four at ({}, {})", x, y);
        let mv = Move::scored(x, y, role, Scores::get(Shape::CLOSED_FOUR) + 10_000);
        return Some(Decision::new(mv, Stage::BlockJumpFour));
      }
    }

    let blocks = threats::find_open_three_blocks(board, opp);
    for block in &blocks {
      if is_valid(work, block.x, block.y, role)
        && eval::position_score(work, block.x as i32, block.y as i32, role) > Scores::get(Shape::OPEN_THREE)
      {
        let mv = Move::scored(block.x, block.y, role, Scores::get(Shape::OPEN_FOUR) - 50);
        return Some(Decision::new(mv, Stage::BlockOpenThree));
      }
    }
    for block in &blocks {
      if is_valid(work, block.x, block.y, role) {
        let mv = Move::scored(block.x, block.y, role, Scores::get(Shape::OPEN_THREE) + 1000);
        return Some(Decision::new(mv, Stage::BlockOpenThree));
      }
    }
    None
  }

  /// Alpha-beta over the best legal candidates, with optional random deviation.
  fn search(&mut self, board: &Board, work: &mut Board, candidates: &[(usize, usize)], role: Role) -> Decision {
    let mut roots = Vec::new();
    for &(x, y) in candidates {
      if roots.len() >= self.config.candidate_limit {
        break;
      }
      if is_valid(work, x, y, role) {
        roots.push((x, y));
      }
    }

    let depth = self.config.depth.saturating_sub(1);
    let mut best: Option<Move> = None;
    let mut alpha = -MAX;
    for &(x, y) in &roots {
      let mut child = board.clone();
      child.set(x, y, role);
      let score = self.minimax(child, depth, alpha, MAX, false, role);
      if best.map_or(true, |b| score > b.score.unwrap_or(-MAX)) {
        best = Some(Move::scored(x, y, role, score));
      }
      alpha = alpha.max(score);
    }

    if self.config.random_factor > 0.0 && roots.len() > 2 && self.rng.gen::<f64>() < self.config.random_factor {
      let (x, y) = roots[self.rng.gen_range(0..roots.len().min(RANDOM_POOL))];
      debug!("deviating from minimax choice {:?}", best.map(|b| b.pos()));
      return Decision::new(Move::new(x, y, role), Stage::RandomDeviation);
    }

    match best {
      Some(mv) => Decision::new(mv, Stage::Minimax),
      None => {
        let (x, y) = first_legal_move(work, role).unwrap_or((CENTER, CENTER));
        warn!("no candidate survived for {:?}; falling back to ({}, {})", role, x, y);
        Decision::new(Move::new(x, y, role), Stage::Fallback)
      }
    }
  }

  /// Minimax with alpha-beta pruning. Each child gets its own board copy.
  ///
  /// Wins are scored FIVE plus the remaining depth so quicker wins and
  /// slower losses are preferred. Expired deadlines and depth 0 return the
  /// static evaluation.
  pub fn minimax(&mut self, board: Board, depth: u32, mut alpha: i64, mut beta: i64, maximizing: bool, ai_role: Role) -> i64 {
    self.nodes += 1;
    if self.deadline.poll() {
      return self.evaluate(&board, ai_role);
    }

    if let Some(score) = terminal_score(&board, depth, ai_role) {
      return score;
    }
    if depth == 0 {
      return self.evaluate(&board, ai_role);
    }

    let current = if maximizing { ai_role } else { ai_role.opponent() };
    let candidates = self.node_candidates(&board, current, depth);
    if candidates.is_empty() {
      return self.evaluate(&board, ai_role);
    }

    if maximizing {
      let mut max_eval = -MAX;
      for (x, y) in candidates {
        let mut child = board.clone();
        child.set(x, y, current);
        let value = self.minimax(child, depth - 1, alpha, beta, false, ai_role);
        max_eval = max_eval.max(value);
        alpha = alpha.max(value);
        if beta <= alpha {
          break;
        }
      }
      max_eval
    } else {
      let mut min_eval = MAX;
      for (x, y) in candidates {
        let mut child = board.clone();
        child.set(x, y, current);
        let value = self.minimax(child, depth - 1, alpha, beta, true, ai_role);
        min_eval = min_eval.min(value);
        beta = beta.min(value);
        if beta <= alpha {
          break;
        }
      }
      min_eval
    }
  }

  /// Legal moves for `current`, most urgent first, truncated for this depth.
  pub(crate) fn node_candidates(&self, board: &Board, current: Role, depth: u32) -> Vec<(usize, usize)> {
    let mut work = board.clone();
    let opp = current.opponent();
    let mut scored = Vec::new();
    for (x, y) in board.candidate_moves(CANDIDATE_RADIUS) {
      if is_valid(&mut work, x, y, current) {
        scored.push(((x, y), eval::move_urgency(&mut work, x as i32, y as i32, current, opp)));
      }
    }
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let limit = MIN_NODE_CANDIDATES.max(self.config.candidate_limit.saturating_sub(depth as usize));
    scored.into_iter().take(limit).map(|(pos, _)| pos).collect()
  }

  pub fn evaluate(&self, board: &Board, ai_role: Role) -> i64 {
    eval::static_evaluate(board, ai_role, self.config.skip_defense)
  }
}

/// Win bonus (or loss penalty) if the last stone on the board completed five.
pub(crate) fn terminal_score(board: &Board, depth: u32, ai_role: Role) -> Option<i64> {
  let (x, y, role) = board.last_move()?;
  if !rules::check_win(board, x as i32, y as i32, role) {
    return None;
  }
  let bonus = Scores::get(Shape::FIVE) + depth as i64;
  Some(if role == ai_role { bonus } else { -bonus })
}

fn is_valid(work: &mut Board, x: usize, y: usize, role: Role) -> bool {
  rules::is_valid_move(work, x as i32, y as i32, role)
}

/// Would `role` win by playing the empty (x, y)?
fn wins_at(board: &Board, x: usize, y: usize, role: Role) -> bool {
  let mut next = board.clone();
  next.set(x, y, role);
  rules::check_win(&next, x as i32, y as i32, role)
}

/// Candidates ordered by urgency for `role`, most urgent first.
fn sorted_candidates(work: &mut Board, role: Role) -> Vec<(usize, usize)> {
  let opp = role.opponent();
  let mut scored: Vec<((usize, usize), i64)> = Vec::new();
  for (x, y) in work.candidate_moves(CANDIDATE_RADIUS) {
    let urgency = eval::move_urgency(work, x as i32, y as i32, role, opp);
    scored.push(((x, y), urgency));
  }
  scored.sort_by(|a, b| b.1.cmp(&a.1));
  scored.into_iter().map(|(pos, _)| pos).collect()
}

/// Most urgent legal cell within two of the center, if it is urgent enough.
fn early_center_move(work: &mut Board, role: Role) -> Option<(usize, usize)> {
  let opp = role.opponent();
  let mut best: Option<((usize, usize), i64)> = None;
  for dy in -2..=2 {
    for dx in -2..=2 {
      let (x, y) = ((CENTER as i32 + dx) as usize, (CENTER as i32 + dy) as usize);
      if !is_valid(work, x, y, role) {
        continue;
      }
      let urgency = eval::move_urgency(work, x as i32, y as i32, role, opp);
      if best.map_or(true, |(_, u)| urgency > u) {
        best = Some(((x, y), urgency));
      }
    }
  }
  best.filter(|&(_, urgency)| urgency > EARLY_URGENCY_THRESHOLD).map(|(pos, _)| pos)
}

/// Can the opponent answer with an open four or a four-three somewhere?
fn has_strong_reply(work: &mut Board, candidates: &[(usize, usize)], opp: Role) -> bool {
  candidates.iter().any(|&(x, y)| {
    let (ix, iy) = (x as i32, y as i32);
    work.is_empty(ix, iy) && (threats::creates_open_four(work, ix, iy, opp) || threats::creates_four_three(work, ix, iy, opp))
  })
}

fn first_legal_move(work: &mut Board, role: Role) -> Option<(usize, usize)> {
  (0..SIZE * SIZE).map(|i| (i % SIZE, i / SIZE)).find(|&(x, y)| is_valid(work, x, y, role))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

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

  fn test_config(depth: u32, candidate_limit: usize) -> DifficultyConfig {
    DifficultyConfig {
      depth,
      candidate_limit,
      random_factor: 0.0,
      vcf_depth: 0,
      time_limit: Duration::from_secs(3600),
      skip_defense: false,
    }
  }

  fn engine(config: DifficultyConfig) -> AIEngine {
    AIEngine::with_config(config, StdRng::seed_from_u64(7))
  }

  /// Plain minimax over exactly the same candidates, without pruning.
  fn exhaustive(engine: &AIEngine, board: &Board, depth: u32, maximizing: bool, ai_role: Role) -> i64 {
    if let Some(score) = terminal_score(board, depth, ai_role) {
      return score;
    }
    if depth == 0 {
      return engine.evaluate(board, ai_role);
    }
    let current = if maximizing { ai_role } else { ai_role.opponent() };
    let candidates = engine.node_candidates(board, current, depth);
    if candidates.is_empty() {
      return engine.evaluate(board, ai_role);
    }
    let values = candidates.into_iter().map(|(x, y)| {
      let mut child = board.clone();
      child.set(x, y, current);
      exhaustive(engine, &child, depth - 1, !maximizing, ai_role)
    });
    if maximizing {
      values.max().unwrap_or(-MAX)
    } else {
      values.min().unwrap_or(MAX)
    }
  }

  #[test]
  fn test_empty_board_plays_center() {
    let mut ai = AIEngine::seeded(Difficulty::Hard, 1);
    let decision = ai.decide(&Board::new(), Role::Black);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::Opening);
  }

  #[test]
  fn test_second_move_goes_diagonal_to_center() {
    let board = board_with(&[(7, 7)], &[]);
    let mut ai = AIEngine::seeded(Difficulty::Normal, 3);
    let mv = ai.choose_move(&board, Role::White);
    assert!(CENTER_DIAGONALS.contains(&mv.pos()));

    let off_center = board_with(&[(3, 3)], &[]);
    assert_eq!(ai.choose_move(&off_center, Role::White).pos(), (7, 7));
  }

  #[test]
  fn test_third_move_book() {
    let board = board_with(&[(7, 7)], &[(6, 6)]);
    let mut ai = AIEngine::seeded(Difficulty::Hard, 3);
    assert_eq!(ai.choose_move(&board, Role::Black).pos(), (8, 8));
    let board = board_with(&[(7, 7)], &[(7, 8)]);
    assert_eq!(ai.choose_move(&board, Role::Black).pos(), (7, 6));
  }

  #[test]
  fn test_completes_five() {
    let board = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[(0, 0), (14, 0), (0, 14), (14, 14)]);
    let mut ai = AIEngine::seeded(Difficulty::Hard, 1);
    let decision = ai.decide(&board, Role::Black);
    assert!(decision.mv.pos() == (4, 7) || decision.mv.pos() == (9, 7));
    assert_eq!(decision.stage, Stage::Win);
    assert_eq!(decision.mv.score, Some(Scores::get(Shape::FIVE)));
  }

  #[test]
  fn test_blocks_five_without_skip_defense() {
    let board = board_with(&[(0, 0), (14, 0), (0, 14)], &[(5, 7), (6, 7), (7, 7), (8, 7)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert!(decision.mv.pos() == (4, 7) || decision.mv.pos() == (9, 7));
    assert_eq!(decision.stage, Stage::BlockFive);
  }

  #[test]
  fn test_creates_open_four_from_open_three() {
    let board = board_with(&[(5, 7), (6, 7), (7, 7)], &[(0, 0), (14, 0), (0, 14)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert!(decision.mv.pos() == (4, 7) || decision.mv.pos() == (8, 7));
    assert_eq!(decision.stage, Stage::OpenFour);
  }

  #[test]
  fn test_blocks_opponent_open_three_before_it_becomes_open_four() {
    let board = board_with(&[(0, 0), (14, 0), (0, 14)], &[(6, 7), (7, 7), (8, 7)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert!(decision.mv.pos() == (5, 7) || decision.mv.pos() == (9, 7));
    assert_eq!(decision.stage, Stage::BlockOpenFour);
  }

  #[test]
  fn test_forced_win_stage() {
    let board = board_with(&[(4, 7), (5, 7), (6, 7), (7, 8), (7, 9)], &[(3, 7), (0, 0), (14, 14)]);
    let mut config = test_config(2, 6);
    config.vcf_depth = 10;
    let mut ai = engine(config);
    let decision = ai.decide(&board, Role::Black);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::Vcf);
  }

  #[test]
  fn test_pruned_score_matches_exhaustive() {
    let board = board_with(&[(7, 7), (8, 8), (6, 8)], &[(7, 8), (6, 6)]);
    let mut ai = engine(test_config(3, 4));
    for depth in 1..=3 {
      let pruned = ai.minimax(board.clone(), depth, -MAX, MAX, true, Role::Black);
      let full = exhaustive(&ai, &board, depth, true, Role::Black);
      assert_eq!(pruned, full, "depth {}", depth);
    }
  }

  #[test]
  fn test_minimax_prefers_immediate_win() {
    let board = board_with(&[(5, 7), (6, 7), (7, 7), (8, 7)], &[(5, 8), (6, 8), (7, 8)]);
    let mut ai = engine(test_config(2, 6));
    let mut child = board.clone();
    child.set(9, 7, Role::Black);
    let score = ai.minimax(child, 1, -MAX, MAX, false, Role::Black);
    assert_eq!(score, Scores::get(Shape::FIVE) + 1);
  }

  #[test]
  fn test_full_board_falls_back_to_center() {
    let mut board = Board::new();
    for y in 0..SIZE {
      for x in 0..SIZE {
        let role = if ((x + 2 * y) / 2) % 2 == 0 { Role::Black } else { Role::White };
        board.set(x, y, role);
      }
    }
    let mut ai = AIEngine::seeded(Difficulty::Normal, 5);
    let decision = ai.decide(&board, Role::White);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::Fallback);
  }

  #[test]
  fn test_last_empty_cell_is_played() {
    let mut board = Board::new();
    for y in 0..SIZE {
      for x in 0..SIZE {
        let role = if ((x + 2 * y) / 2) % 2 == 0 { Role::Black } else { Role::White };
        board.set(x, y, role);
      }
    }
    board.clear(14, 14);
    let mut ai = AIEngine::seeded(Difficulty::Normal, 5);
    assert_eq!(ai.choose_move(&board, Role::White).pos(), (14, 14));
  }

  #[test]
  fn test_expired_budget_still_returns_legal_move() {
    let board = board_with(&[(7, 7), (8, 8), (6, 9), (9, 6)], &[(7, 8), (6, 6), (8, 7), (9, 9)]);
    let mut config = test_config(6, 18);
    config.time_limit = Duration::ZERO;
    let mut ai = engine(config);
    let mv = ai.choose_move(&board, Role::Black);
    assert!(board.is_legal(mv.x as i32, mv.y as i32, Role::Black));
  }

  #[test]
  fn test_seeded_engines_agree() {
    let board = board_with(&[(7, 7), (8, 8), (6, 9)], &[(7, 8), (6, 6), (9, 9)]);
    let first = AIEngine::seeded(Difficulty::Easy, 42).choose_move(&board, Role::Black);
    let second = AIEngine::seeded(Difficulty::Easy, 42).choose_move(&board, Role::Black);
    assert_eq!(first.pos(), second.pos());
  }

  #[test]
  fn test_black_never_picks_forbidden_square() {
    // (7,7) would be a double-three for Black and also the most central cell
    let board = board_with(&[(5, 7), (6, 7), (7, 5), (7, 6)], &[(0, 0), (14, 0), (0, 14), (14, 14)]);
    let mut ai = engine(test_config(2, 6));
    let mv = ai.choose_move(&board, Role::Black);
    assert_ne!(mv.pos(), (7, 7));
    assert!(board.is_legal(mv.x as i32, mv.y as i32, Role::Black));
  }

  #[test]
  fn test_early_center_answers_a_closed_three() {
    // Black's diagonal three at (9,9) would be closed by (6,6) but still urgent
    let board = board_with(&[(7, 7), (8, 8)], &[(6, 6)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::White);
    assert_eq!(decision.mv.pos(), (9, 9));
    assert_eq!(decision.stage, Stage::EarlyCenter);
  }

  #[test]
  fn test_blocks_broken_four_whose_gap_is_overline_for_black() {
    // BB.BBB: Black cannot fill the gap, but the shape still has to be closed
    let board = board_with(&[(3, 7), (4, 7), (6, 7), (7, 7), (8, 7)], &[(9, 7), (0, 0), (14, 14)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::White);
    assert_eq!(decision.mv.pos(), (5, 7));
    assert_eq!(decision.stage, Stage::BlockJumpFour);
    assert_eq!(decision.mv.score, Some(Scores::get(Shape::CLOSED_FOUR) + 10_000));
  }

  #[test]
  fn test_blocks_open_three_that_cannot_become_open_four() {
    // W.BBB.W: no open four for Black, yet the three is still blocked
    let board = board_with(&[(4, 7), (5, 7), (6, 7)], &[(2, 7), (8, 7)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::White);
    assert!(decision.mv.pos() == (3, 7) || decision.mv.pos() == (7, 7), "{:?}", decision);
    assert_eq!(decision.stage, Stage::BlockOpenThree);
  }

  #[test]
  fn test_blocks_opponent_forced_win() {
    let board = board_with(&[(3, 7), (0, 0), (14, 0)], &[(4, 7), (5, 7), (6, 7), (7, 8), (7, 9)]);
    let mut config = test_config(2, 6);
    config.vcf_depth = 10;
    let mut ai = engine(config);
    let decision = ai.decide(&board, Role::Black);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::BlockVcf);
  }

  #[test]
  fn test_plays_four_three_without_forced_win_search() {
    let board = board_with(&[(4, 7), (5, 7), (6, 7), (7, 8), (7, 9)], &[(3, 7), (0, 0), (14, 14)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::FourThree);
    assert_eq!(decision.mv.score, Some(Scores::get(Shape::OPEN_FOUR) - 100));
  }

  #[test]
  fn test_blocks_opponent_four_three() {
    let board = board_with(&[(3, 7), (0, 0), (14, 0)], &[(4, 7), (5, 7), (6, 7), (7, 8), (7, 9)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::BlockFourThree);
  }

  #[test]
  fn test_white_plays_double_three() {
    let board = board_with(&[(0, 0), (14, 0), (0, 14), (14, 14)], &[(5, 7), (6, 7), (7, 5), (7, 6)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::White);
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(decision.stage, Stage::DoubleThree);
  }

  #[test]
  fn test_extends_two_into_open_three() {
    let board = board_with(&[(6, 7), (7, 7)], &[(0, 0), (14, 0), (0, 14)]);
    let mut ai = engine(test_config(2, 6));
    let decision = ai.decide(&board, Role::Black);
    assert!(decision.mv.pos() == (5, 7) || decision.mv.pos() == (8, 7), "{:?}", decision);
    assert_eq!(decision.stage, Stage::OpenThree);
  }

  #[test]
  fn test_random_deviation_stays_in_top_four() {
    let board = board_with(&[(7, 7), (11, 9), (3, 10)], &[(8, 8), (5, 4), (12, 4)]);
    let mut work = board.clone();
    let top: Vec<(usize, usize)> = sorted_candidates(&mut work, Role::Black)
      .into_iter()
      .filter(|&(x, y)| is_valid(&mut work, x, y, Role::Black))
      .take(RANDOM_POOL)
      .collect();

    let mut config = test_config(2, 6);
    config.random_factor = 1.0;
    for seed in 0..8 {
      let mut ai = AIEngine::with_config(config, StdRng::seed_from_u64(seed));
      let decision = ai.decide(&board, Role::Black);
      assert_eq!(decision.stage, Stage::RandomDeviation);
      assert!(top.contains(&decision.mv.pos()), "{:?} not in {:?}", decision.mv, top);
    }
  }

  #[test]
  fn test_skip_defense_sometimes_ignores_a_five() {
    let board = board_with(&[(0, 0), (14, 0), (0, 14)], &[(5, 7), (6, 7), (7, 7), (8, 7)]);
    let mut weak = test_config(1, 6);
    weak.skip_defense = true;
    let strong = test_config(1, 6);

    let mut blocked = 0;
    for seed in 0..40 {
      let mut ai = AIEngine::with_config(weak, StdRng::seed_from_u64(seed));
      if ai.decide(&board, Role::Black).stage == Stage::BlockFive {
        blocked += 1;
      }
      let mut ai = AIEngine::with_config(strong, StdRng::seed_from_u64(seed));
      assert_eq!(ai.decide(&board, Role::Black).stage, Stage::BlockFive);
    }
    assert!(blocked > 0 && blocked < 40, "blocked {} of 40", blocked);
  }
}
