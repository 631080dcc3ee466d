//! Gomoku on a 15x15 board with Renju restrictions for Black, plus a
//! difficulty-graded engine.

pub mod ai;
pub mod board;
pub mod cache;
pub mod deadline;
pub mod difficulty;
pub mod error;
pub mod eval;
pub mod game;
pub mod player;
pub mod rules;
pub mod scores;
pub mod shapes;
pub mod threats;
pub mod vcf;

pub use ai::{AIEngine, Decision, SearchStats, Stage};
pub use board::{Board, Move};
pub use difficulty::{Difficulty, DifficultyConfig};
pub use error::{BoardParseError, Forbidden, MoveError};
pub use game::{Game, GameMode, Outcome};
pub use player::{Cell, Player, PlayerType, Role};
