use crate::ai::{AIEngine, Decision, SearchStats};
use crate::board::{Board, Move};
use crate::error::MoveError;
use crate::player::{Player, PlayerType, Role};
use crate::rules;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
  AIvAI,
  AIvHuman,
  HumanvHuman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Win(Role),
  Draw,
}

/// Turn-taking controller: Black moves first, then the sides alternate
/// until someone makes five or the board fills up.
pub struct Game {
  pub mode: GameMode,
  pub black: Player,
  pub white: Player,

  black_engine: Option<AIEngine>,
  white_engine: Option<AIEngine>,

  // Position the history is replayed onto
  initial: Board,
  board: Board,
  history: Vec<Move>,
  to_move: Role,
  outcome: Option<Outcome>,
}

impl Game {
  /// With a seed, both engines are reproducible (White uses `seed + 1`).
  pub fn new(black: Player, white: Player, seed: Option<u64>) -> Self {
    let mode = match (black.player_type, white.player_type) {
      (PlayerType::AI, PlayerType::AI) => GameMode::AIvAI,
      (PlayerType::Human, PlayerType::Human) => GameMode::HumanvHuman,
      _ => GameMode::AIvHuman,
    };
    let engine_for = |player: &Player, offset: u64| match player.player_type {
      PlayerType::Human => None,
      PlayerType::AI => Some(match seed {
        Some(seed) => AIEngine::seeded(player.difficulty, seed.wrapping_add(offset)),
        None => AIEngine::new(player.difficulty),
      }),
    };

    Self {
      mode,
      black_engine: engine_for(&black, 0),
      white_engine: engine_for(&white, 1),
      black,
      white,
      initial: Board::new(),
      board: Board::new(),
      history: Vec::new(),
      to_move: Role::Black,
      outcome: None,
    }
  }

  /// Continue from an imported position. A five already on the board ends the game.
  pub fn load(&mut self, board: Board, to_move: Role) {
    self.initial = board.clone();
    self.board = board;
    self.history.clear();
    self.to_move = to_move;
    self.outcome = self.scan_outcome();
  }

  pub fn reset(&mut self) {
    self.initial = Board::new();
    self.board = Board::new();
    self.history.clear();
    self.to_move = Role::Black;
    self.outcome = None;
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn history(&self) -> &[Move] {
    &self.history
  }

  pub fn to_move(&self) -> Role {
    self.to_move
  }

  pub fn player(&self, role: Role) -> &Player {
    match role {
      Role::Black => &self.black,
      Role::White => &self.white,
    }
  }

  pub fn current_player(&self) -> &Player {
    self.player(self.to_move)
  }

  pub fn outcome(&self) -> Option<Outcome> {
    self.outcome
  }

  pub fn is_over(&self) -> bool {
    self.outcome.is_some()
  }

  pub fn winner(&self) -> Option<Role> {
    match self.outcome {
      Some(Outcome::Win(role)) => Some(role),
      _ => None,
    }
  }

  /// Statistics of the last search made by `role`'s engine.
  pub fn stats(&self, role: Role) -> Option<SearchStats> {
    let engine = match role {
      Role::Black => self.black_engine.as_ref(),
      Role::White => self.white_engine.as_ref(),
    };
    engine.map(|engine| engine.stats)
  }

  /// A human placement for the side to move.
  pub fn play(&mut self, x: i32, y: i32) -> Result<Move, MoveError> {
    if self.is_over() {
      return Err(MoveError::GameOver);
    }
    if self.current_player().player_type != PlayerType::Human {
      return Err(MoveError::NotYourTurn);
    }
    self.commit(x, y)
  }

  /// Let the engine of the side to move pick and play its move.
  pub fn engine_move(&mut self) -> Result<Decision, MoveError> {
    if self.is_over() {
      return Err(MoveError::GameOver);
    }
    let role = self.to_move;
    let engine = match role {
      Role::Black => self.black_engine.as_mut(),
      Role::White => self.white_engine.as_mut(),
    };
    let decision = match engine {
      Some(engine) => engine.decide(&self.board, role),
      None => return Err(MoveError::NotYourTurn),
    };
    self.commit(decision.mv.x as i32, decision.mv.y as i32)?;
    Ok(decision)
  }

  /// Take back the last move. Returns false when there is nothing to undo.
  pub fn undo(&mut self) -> bool {
    let Some(last) = self.history.pop() else {
      return false;
    };
    let mut board = self.initial.clone();
    for mv in &self.history {
      board.set(mv.x, mv.y, mv.role);
    }
    self.board = board;
    self.to_move = last.role;
    self.outcome = None;
    true
  }

  /// Undo until a human is to move again (or history runs out).
  pub fn undo_to_human(&mut self) -> bool {
    if !self.undo() {
      return false;
    }
    while self.current_player().player_type == PlayerType::AI && self.undo() {}
    true
  }

  fn commit(&mut self, x: i32, y: i32) -> Result<Move, MoveError> {
    let role = self.to_move;
    self.board.place(x, y, role)?;
    let mv = Move::new(x as usize, y as usize, role);
    self.history.push(mv);

    if rules::check_win(&self.board, x, y, role) {
      info!("{:?} wins with ({}, {}) after {} moves", role, x, y, self.history.len());
      self.outcome = Some(Outcome::Win(role));
    } else if self.board.is_full() {
      info!("board full, draw");
      self.outcome = Some(Outcome::Draw);
    }
    self.to_move = role.opponent();
    Ok(mv)
  }

  fn scan_outcome(&self) -> Option<Outcome> {
    [Role::Black, Role::White]
      .into_iter()
      .find(|&role| rules::has_five_anywhere(&self.board, role))
      .map(Outcome::Win)
      .or_else(|| self.board.is_full().then_some(Outcome::Draw))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::difficulty::Difficulty;
  use crate::error::Forbidden;

  fn humans() -> Game {
    Game::new(Player::human(Role::Black), Player::human(Role::White), None)
  }

  #[test]
  fn test_black_moves_first_and_sides_alternate() {
    let mut game = humans();
    assert_eq!(game.to_move(), Role::Black);
    let mv = game.play(7, 7).unwrap();
    assert_eq!(mv.role, Role::Black);
    assert_eq!(game.to_move(), Role::White);
    assert_eq!(game.mode, GameMode::HumanvHuman);
  }

  #[test]
  fn test_refusals_keep_turn() {
    let mut game = humans();
    game.play(7, 7).unwrap();
    assert_eq!(game.play(7, 7), Err(MoveError::Occupied { x: 7, y: 7 }));
    assert_eq!(game.play(-1, 3), Err(MoveError::OutOfBounds { x: -1, y: 3 }));
    assert_eq!(game.to_move(), Role::White);
    assert_eq!(game.history().len(), 1);
  }

  #[test]
  fn test_forbidden_black_move_is_refused() {
    let mut game = humans();
    for (x, y) in [(5, 7), (0, 0), (6, 7), (0, 1), (7, 5), (0, 2), (7, 6), (0, 3)] {
      game.play(x, y).unwrap();
    }
    // Black to move; (7,7) makes two open threes
    assert_eq!(
      game.play(7, 7),
      Err(MoveError::Forbidden {
        x: 7,
        y: 7,
        reason: Forbidden::DoubleThree
      })
    );
  }

  #[test]
  fn test_five_ends_the_game() {
    let mut game = humans();
    for i in 0..4 {
      game.play(i + 3, 7).unwrap();
      game.play(i + 3, 9).unwrap();
    }
    game.play(7, 7).unwrap();
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Role::Black));
    assert_eq!(game.play(0, 0), Err(MoveError::GameOver));
  }

  #[test]
  fn test_undo_rebuilds_position() {
    let mut game = humans();
    game.play(7, 7).unwrap();
    game.play(8, 8).unwrap();
    assert!(game.undo());
    assert_eq!(game.to_move(), Role::White);
    assert!(game.board().is_empty(8, 8));
    assert_eq!(game.board().last_move(), Some((7, 7, Role::Black)));
    assert!(game.undo());
    assert!(!game.undo());
    assert_eq!(game.board(), &Board::new());
  }

  #[test]
  fn test_undo_reopens_finished_game() {
    let mut game = humans();
    for i in 0..4 {
      game.play(i + 3, 7).unwrap();
      game.play(i + 3, 9).unwrap();
    }
    game.play(7, 7).unwrap();
    assert!(game.undo());
    assert!(!game.is_over());
    assert_eq!(game.to_move(), Role::Black);
  }

  #[test]
  fn test_human_cannot_play_engine_turn() {
    let mut game = Game::new(Player::ai(Role::Black, Difficulty::Easy), Player::human(Role::White), Some(9));
    assert_eq!(game.play(7, 7), Err(MoveError::NotYourTurn));
    let decision = game.engine_move().unwrap();
    assert_eq!(decision.mv.pos(), (7, 7));
    assert_eq!(game.engine_move().unwrap_err(), MoveError::NotYourTurn);
    game.play(8, 8).unwrap();
    assert!(game.undo_to_human());
    assert_eq!(game.to_move(), Role::White);
    assert_eq!(game.history().len(), 1);
  }

  #[test]
  fn test_load_detects_existing_five() {
    let mut game = humans();
    let mut board = Board::new();
    for x in 2..7 {
      board.set(x, 3, Role::White);
    }
    game.load(board, Role::Black);
    assert_eq!(game.winner(), Some(Role::White));
    game.reset();
    assert!(!game.is_over());
    assert_eq!(game.to_move(), Role::Black);
  }
}
