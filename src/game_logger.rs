use gomoku_renju::ai::{Decision, SearchStats};
use gomoku_renju::board::{Board, SIZE};
use gomoku_renju::game::Outcome;
use gomoku_renju::player::Role;
use std::fs::File;
use std::io::{self, Write};

/// Human-readable record of a headless game, one section per move.
pub struct GameLogger {
  file: File,
}

impl GameLogger {
  pub fn new(filename: &str) -> io::Result<Self> {
    let file = File::create(filename)?;
    Ok(Self { file })
  }

  pub fn log_move_start(&mut self, role: Role, round: usize) -> io::Result<()> {
    writeln!(
      self.file,
      "\n{}\nMove #{} - Player: {:?} ({})\n{}",
      "=".repeat(80),
      round,
      role,
      role.symbol(),
      "=".repeat(80)
    )
  }

  pub fn log_board_state(&mut self, board: &Board) -> io::Result<()> {
    writeln!(self.file, "\nCurrent board state:")?;
    writeln!(self.file, "   {}", (0..SIZE).map(|i| format!("{:2}", i)).collect::<Vec<_>>().join(" "))?;

    for y in 0..SIZE {
      write!(self.file, "{:2} ", y)?;
      for x in 0..SIZE {
        write!(self.file, " {} ", board.get(x as i32, y as i32).symbol())?;
      }
      writeln!(self.file)?;
    }
    writeln!(self.file, "\nInterchange: {}", board)
  }

  pub fn log_candidates(&mut self, candidates: &[(usize, usize)]) -> io::Result<()> {
    writeln!(self.file, "\nCandidate moves ({}): ", candidates.len())?;
    for (i, &(x, y)) in candidates.iter().enumerate().take(10) {
      if i > 0 && i % 5 == 0 {
        writeln!(self.file)?;
      }
      write!(self.file, "  ({:2},{:2})", x, y)?;
    }
    if candidates.len() > 10 {
      writeln!(self.file, "\n  ... and {} more", candidates.len() - 10)?;
    }
    writeln!(self.file)
  }

  pub fn log_decision(&mut self, decision: &Decision, stats: &SearchStats) -> io::Result<()> {
    writeln!(self.file, "\n*** DECISION ***")?;
    writeln!(self.file, "  Chosen move: ({}, {})", decision.mv.x, decision.mv.y)?;
    writeln!(self.file, "  Stage: {:?}", decision.stage)?;
    match decision.mv.score {
      Some(score) => writeln!(self.file, "  Score: {}", score)?,
      None => writeln!(self.file, "  Score: -")?,
    }
    writeln!(
      self.file,
      "  Search: {} nodes in {}ms{}",
      stats.nodes,
      stats.elapsed_ms,
      if stats.timed_out { " (timeout)" } else { "" }
    )?;
    self.file.flush()
  }

  pub fn log_game_end(&mut self, outcome: Option<Outcome>, total_moves: usize) -> io::Result<()> {
    writeln!(self.file, "\n\n{}", "=".repeat(80))?;
    writeln!(self.file, "GAME OVER")?;
    writeln!(self.file, "{}", "=".repeat(80))?;
    writeln!(self.file, "Result: {}", describe(outcome))?;
    writeln!(self.file, "Total moves: {}", total_moves)?;
    writeln!(self.file, "{}\n", "=".repeat(80))?;
    self.file.flush()
  }
}

pub fn describe(outcome: Option<Outcome>) -> &'static str {
  match outcome {
    Some(Outcome::Win(Role::Black)) => "BLACK (B) WINS!",
    Some(Outcome::Win(Role::White)) => "WHITE (W) WINS!",
    Some(Outcome::Draw) => "DRAW",
    None => "UNFINISHED",
  }
}
