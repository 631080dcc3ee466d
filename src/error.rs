//! Refusals surfaced to whoever drives the board.
//! Illegal input is expected during play, so none of these abort anything.

use thiserror::Error;

/// Renju rule broken by a Black move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forbidden {
  Overline,
  DoubleThree,
  DoubleFour,
}

impl std::fmt::Display for Forbidden {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Forbidden::Overline => "overline",
      Forbidden::DoubleThree => "double-three",
      Forbidden::DoubleFour => "double-four",
    };
    f.write_str(name)
  }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
  #[error("({x}, {y}) is outside the board")]
  OutOfBounds { x: i32, y: i32 },

  #[error("({x}, {y}) is already occupied")]
  Occupied { x: usize, y: usize },

  #[error("({x}, {y}) is a forbidden move ({reason})")]
  Forbidden { x: usize, y: usize, reason: Forbidden },

  #[error("it is not your turn")]
  NotYourTurn,

  #[error("the game is already over")]
  GameOver,
}

/// Errors reading the 225-symbol board interchange format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
  #[error("expected 225 cells, got {0}")]
  WrongLength(usize),

  #[error("invalid symbol {symbol:?} at index {index}")]
  InvalidSymbol { index: usize, symbol: char },
}
