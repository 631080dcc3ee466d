use crate::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
  Human,
  AI,
}

// Color of the stone. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
  Black,
  White,
}

impl Role {
  // Get the opponent's role
  pub fn opponent(&self) -> Role {
    match self {
      Role::Black => Role::White,
      Role::White => Role::Black,
    }
  }

  // Cell state occupied by this role
  pub fn cell(&self) -> Cell {
    match self {
      Role::Black => Cell::Black,
      Role::White => Cell::White,
    }
  }

  // Symbol used by the board interchange format
  pub fn symbol(&self) -> char {
    self.cell().symbol()
  }
}

/// State of a single grid position.
///
/// `Wall` is never stored in the grid; it is what `Board::get` answers for
/// coordinates outside the 15x15 area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
  Empty,
  Black,
  White,
  Wall,
}

impl Cell {
  pub fn symbol(&self) -> char {
    match self {
      Cell::Empty => '.',
      Cell::Black => 'B',
      Cell::White => 'W',
      Cell::Wall => 'X',
    }
  }

  pub fn from_symbol(c: char) -> Option<Cell> {
    match c {
      '.' => Some(Cell::Empty),
      'B' => Some(Cell::Black),
      'W' => Some(Cell::White),
      _ => None,
    }
  }

  pub fn role(&self) -> Option<Role> {
    match self {
      Cell::Black => Some(Role::Black),
      Cell::White => Some(Role::White),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Player {
  pub player_type: PlayerType,
  pub role: Role,

  // Strength of the engine when player_type is AI
  pub difficulty: Difficulty,
}

impl Player {
  pub fn human(role: Role) -> Self {
    Self {
      player_type: PlayerType::Human,
      role,
      difficulty: Difficulty::Normal,
    }
  }

  pub fn ai(role: Role, difficulty: Difficulty) -> Self {
    Self {
      player_type: PlayerType::AI,
      role,
      difficulty,
    }
  }
}
