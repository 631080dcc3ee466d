use crossterm::{
  cursor::{Hide, MoveTo, Show},
  event::{read, Event, KeyCode, KeyEvent, KeyEventKind},
  execute,
  style::{Color, Print, ResetColor, SetForegroundColor},
  terminal::{disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen},
};

use gomoku_renju::board::{Board, SIZE};
use gomoku_renju::player::Cell;
use std::io::{stdout, Result as IoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
  None,
  Quit,
  Undo,
  MoveLeft,
  MoveRight,
  MoveUp,
  MoveDown,
  PlaceStone,
}

pub struct TerminalUI {
  /// Shown on the line below the board until replaced
  last_message: String,
  status: String,
}

impl TerminalUI {
  /// "Light green" for the cursor
  const CURSOR_COLOR: Color = Color::Rgb { r: 120, g: 255, b: 120 };
  /// "Light red" for the last stone
  const LAST_STONE_COLOR: Color = Color::Rgb { r: 255, g: 140, b: 140 };
  const CELL_WIDTH: u16 = 3;

  pub fn new() -> Self {
    Self {
      last_message: String::new(),
      status: String::new(),
    }
  }

  pub fn init_screen(&mut self) -> IoResult<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;
    Ok(())
  }

  pub fn restore_terminal(&mut self) -> IoResult<()> {
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
  }

  /// Block until a key press and map it to an action.
  pub fn read_input(&mut self) -> GameAction {
    match read() {
      Ok(Event::Key(KeyEvent { code, kind, .. })) if kind != KeyEventKind::Release => match code {
        KeyCode::Esc | KeyCode::Char('q') => GameAction::Quit,
        KeyCode::Backspace | KeyCode::Char('u') => GameAction::Undo,
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Up => GameAction::MoveUp,
        KeyCode::Down => GameAction::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => GameAction::PlaceStone,
        _ => GameAction::None,
      },
      _ => GameAction::None,
    }
  }

  /// Set (and immediately draw) a new message
  pub fn show_message(&mut self, msg: &str) {
    self.last_message = msg.to_string();
    self.draw_message();
  }

  /// Line above the board: whose turn it is, difficulty, and so on.
  pub fn set_status(&mut self, status: &str) {
    self.status = status.to_string();
  }

  fn draw_message(&mut self) {
    let (cols, rows) = size().unwrap_or((80, 24));
    let y = rows.saturating_sub(2);
    let msg_len = self.last_message.chars().count() as u16;
    let x = cols.saturating_sub(msg_len) / 2;

    execute!(stdout(), MoveTo(0, y), Print(" ".repeat(cols as usize))).ok();
    execute!(stdout(), MoveTo(x, y), Print(&self.last_message)).ok();
  }

  pub fn draw_board(&mut self, board: &Board, cursor_x: usize, cursor_y: usize) {
    let (cols, rows) = size().unwrap_or((80, 24));

    let bsize = SIZE as u16;
    let used_width = bsize * Self::CELL_WIDTH - 1;
    let used_height = bsize;

    // Leave a row for the top border and one for the status line
    let offset_x = cols.saturating_sub(used_width) / 2;
    let offset_y = (rows.saturating_sub(used_height) / 2).max(2);

    let last = board.last_move().map(|(x, y, _)| (x, y));
    let mut out = stdout();

    for row in 0..rows {
      execute!(out, MoveTo(0, row), Print(" ".repeat(cols as usize))).ok();
    }

    let status_x = cols.saturating_sub(self.status.chars().count() as u16) / 2;
    execute!(out, MoveTo(status_x, offset_y - 2), Print(&self.status)).ok();

    execute!(out, MoveTo(offset_x, offset_y - 1), Print("╔"), Print("═".repeat(used_width as usize)), Print("╗")).ok();

    for y in 0..SIZE {
      let sy = offset_y + y as u16;
      execute!(out, MoveTo(offset_x, sy), Print("║")).ok();
      for x in 0..SIZE {
        let sx = offset_x + (x as u16) * Self::CELL_WIDTH + 1;
        let is_cursor = (x, y) == (cursor_x, cursor_y);
        let is_last_stone = last == Some((x, y));

        // An empty cell under the cursor shows "+"
        let (symbol, color) = match board.get(x as i32, y as i32) {
          Cell::Empty if is_cursor => ('+', Some(Self::CURSOR_COLOR)),
          Cell::Empty => ('.', None),
          stone if is_cursor => (stone.symbol(), Some(Self::CURSOR_COLOR)),
          stone if is_last_stone => (stone.symbol(), Some(Self::LAST_STONE_COLOR)),
          stone => (stone.symbol(), None),
        };

        if let Some(col) = color {
          execute!(out, MoveTo(sx, sy), SetForegroundColor(col), Print(symbol), ResetColor).ok();
        } else {
          execute!(out, MoveTo(sx, sy), Print(symbol)).ok();
        }
        execute!(out, Print(" ")).ok();
      }
      execute!(out, Print("║")).ok();
    }

    execute!(out, MoveTo(offset_x, offset_y + used_height), Print("╚"), Print("═".repeat(used_width as usize)), Print("╝")).ok();

    self.draw_message();
  }
}
