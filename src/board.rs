use crate::error::{BoardParseError, MoveError};
use crate::player::{Cell, Role};
use crate::rules;
use std::fmt;
use std::str::FromStr;

pub const SIZE: usize = 15;
pub const CELLS: usize = SIZE * SIZE;
pub const CENTER: usize = SIZE / 2;

// Horizontal, vertical, and both diagonals. Each axis also covers its negation.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// A placement, optionally annotated with the score the engine gave it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
  pub x: usize,
  pub y: usize,
  pub role: Role,
  pub score: Option<i64>,
}

impl Move {
  pub fn new(x: usize, y: usize, role: Role) -> Self {
    Self { x, y, role, score: None }
  }

  pub fn scored(x: usize, y: usize, role: Role, score: i64) -> Self {
    Self {
      x,
      y,
      role,
      score: Some(score),
    }
  }

  pub fn pos(&self) -> (usize, usize) {
    (self.x, self.y)
  }
}

/// 15x15 grid, row-major, origin top-left. `x` is the column, `y` the row.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
  cells: [Cell; CELLS],
  last_move: Option<(usize, usize, Role)>,
}

impl Default for Board {
  fn default() -> Self {
    Self::new()
  }
}

impl Board {
  // Create an empty board
  pub fn new() -> Self {
    Self {
      cells: [Cell::Empty; CELLS],
      last_move: None,
    }
  }

  /// Rebuild a board from the 225-symbol interchange format (`.`, `B`, `W`).
  /// The result has no last move recorded.
  pub fn from_symbols(s: &str) -> Result<Self, BoardParseError> {
    let count = s.chars().count();
    if count != CELLS {
      return Err(BoardParseError::WrongLength(count));
    }
    let mut board = Self::new();
    for (index, symbol) in s.chars().enumerate() {
      match Cell::from_symbol(symbol) {
        Some(cell) => board.cells[index] = cell,
        None => return Err(BoardParseError::InvalidSymbol { index, symbol }),
      }
    }
    Ok(board)
  }

  pub fn cells(&self) -> &[Cell; CELLS] {
    &self.cells
  }

  pub fn in_bounds(&self, x: i32, y: i32) -> bool {
    x >= 0 && x < SIZE as i32 && y >= 0 && y < SIZE as i32
  }

  // Out-of-bounds coordinates answer Cell::Wall
  pub fn get(&self, x: i32, y: i32) -> Cell {
    if !self.in_bounds(x, y) {
      return Cell::Wall;
    }
    self.cells[y as usize * SIZE + x as usize]
  }

  pub fn is_empty(&self, x: i32, y: i32) -> bool {
    self.get(x, y) == Cell::Empty
  }

  /// Write one stone and record it as the last move. Out-of-bounds writes are ignored.
  pub fn set(&mut self, x: usize, y: usize, role: Role) {
    if x >= SIZE || y >= SIZE {
      return;
    }
    self.cells[y * SIZE + x] = role.cell();
    self.last_move = Some((x, y, role));
  }

  /// Empty one cell. The last-move record is left alone.
  pub fn clear(&mut self, x: usize, y: usize) {
    if x >= SIZE || y >= SIZE {
      return;
    }
    self.cells[y * SIZE + x] = Cell::Empty;
  }

  /// Place `role` at (x, y), run `f`, then put the cell and the last-move
  /// record back exactly as they were.
  pub fn with_stone<R>(&mut self, x: i32, y: i32, role: Role, f: impl FnOnce(&mut Board) -> R) -> R {
    if !self.in_bounds(x, y) {
      return f(self);
    }
    let idx = y as usize * SIZE + x as usize;
    let saved_cell = self.cells[idx];
    let saved_last = self.last_move;
    self.cells[idx] = role.cell();
    self.last_move = Some((x as usize, y as usize, role));
    let result = f(self);
    self.cells[idx] = saved_cell;
    self.last_move = saved_last;
    result
  }

  /// Legality gate: in bounds, empty, and not forbidden for `role`.
  pub fn check_move(&self, x: i32, y: i32, role: Role) -> Result<(), MoveError> {
    let mut scratch = self.clone();
    rules::check_move(&mut scratch, x, y, role)
  }

  pub fn is_legal(&self, x: i32, y: i32, role: Role) -> bool {
    self.check_move(x, y, role).is_ok()
  }

  /// Legality-gated placement used by controllers.
  pub fn place(&mut self, x: i32, y: i32, role: Role) -> Result<(), MoveError> {
    self.check_move(x, y, role)?;
    self.set(x as usize, y as usize, role);
    Ok(())
  }

  pub fn last_move(&self) -> Option<(usize, usize, Role)> {
    self.last_move
  }

  pub fn move_count(&self) -> usize {
    self.cells.iter().filter(|&&c| c != Cell::Empty).count()
  }

  pub fn is_full(&self) -> bool {
    self.cells.iter().all(|&c| c != Cell::Empty)
  }

  /// Empty cells within `radius` (square neighbourhood) of any stone, in
  /// row-major order. An empty board yields only the center, a full one nothing.
  pub fn candidate_moves(&self, radius: i32) -> Vec<(usize, usize)> {
    if self.move_count() == 0 {
      return vec![(CENTER, CENTER)];
    }
    let mut marked = [false; CELLS];
    for y in 0..SIZE as i32 {
      for x in 0..SIZE as i32 {
        if self.is_empty(x, y) {
          continue;
        }
        for dy in -radius..=radius {
          for dx in -radius..=radius {
            let (nx, ny) = (x + dx, y + dy);
            if self.is_empty(nx, ny) {
              marked[ny as usize * SIZE + nx as usize] = true;
            }
          }
        }
      }
    }

    (0..CELLS).filter(|&i| marked[i]).map(|i| (i % SIZE, i / SIZE)).collect()
  }
}

impl fmt::Display for Board {
  // The interchange format: 225 symbols, row-major
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for cell in self.cells.iter() {
      write!(f, "{}", cell.symbol())?;
    }
    Ok(())
  }
}

impl fmt::Debug for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Board (last move {:?})", self.last_move)?;
    for y in 0..SIZE {
      let row: String = self.cells[y * SIZE..(y + 1) * SIZE].iter().map(|c| c.symbol()).collect();
      writeln!(f, "{:2} {}", y, row)?;
    }
    Ok(())
  }
}

impl FromStr for Board {
  type Err = BoardParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_symbols(s)
  }
}
