use crate::game_logger::{describe, GameLogger};
use crate::terminal_ui::{GameAction, TerminalUI};
use gomoku_renju::board::{CENTER, SIZE};
use gomoku_renju::game::{Game, GameMode};
use gomoku_renju::player::PlayerType;
use log::{info, warn};
use std::error::Error;
use std::io;
use std::thread;
use std::time::Duration;

/// Interactive play in the terminal; engine turns run inline.
pub fn run_interactive(game: &mut Game) -> io::Result<()> {
  let mut ui = TerminalUI::new();
  ui.init_screen()?;
  let result = interactive_loop(game, &mut ui);
  ui.restore_terminal()?;
  result
}

fn interactive_loop(game: &mut Game, ui: &mut TerminalUI) -> io::Result<()> {
  let (mut cursor_x, mut cursor_y) = (CENTER, CENTER);

  loop {
    ui.set_status(&status_line(game));
    ui.draw_board(game.board(), cursor_x, cursor_y);

    if game.is_over() {
      ui.show_message(&format!("Game over: {} Press any key.", describe(game.outcome())));
      ui.read_input();
      return Ok(());
    }

    if game.current_player().player_type == PlayerType::AI {
      match game.engine_move() {
        Ok(decision) => {
          ui.show_message(&format!(
            "{:?} played ({}, {}) [{:?}]",
            decision.mv.role, decision.mv.x, decision.mv.y, decision.stage
          ));
          cursor_x = decision.mv.x;
          cursor_y = decision.mv.y;
        }
        Err(err) => {
          // Engine moves are always legal unless the game already ended
          warn!("engine move refused: {}", err);
          ui.show_message(&err.to_string());
          return Ok(());
        }
      }
      continue;
    }

    match ui.read_input() {
      GameAction::Quit => return Ok(()),
      GameAction::Undo => {
        let undone = match game.mode {
          GameMode::AIvHuman => game.undo_to_human(),
          _ => game.undo(),
        };
        if !undone {
          ui.show_message("No moves to undo.");
        }
      }
      GameAction::MoveLeft => cursor_x = cursor_x.saturating_sub(1),
      GameAction::MoveRight => cursor_x = (cursor_x + 1).min(SIZE - 1),
      GameAction::MoveUp => cursor_y = cursor_y.saturating_sub(1),
      GameAction::MoveDown => cursor_y = (cursor_y + 1).min(SIZE - 1),
      GameAction::PlaceStone => match game.play(cursor_x as i32, cursor_y as i32) {
        Ok(mv) => {
          info!("human {:?} played ({}, {})", mv.role, mv.x, mv.y);
          ui.show_message("");
        }
        Err(err) => ui.show_message(&err.to_string()),
      },
      GameAction::None => {}
    }
  }
}

fn status_line(game: &Game) -> String {
  let player = game.current_player();
  match player.player_type {
    PlayerType::Human => format!("{:?} to move (you)  [arrows move, Enter places, u undoes, q quits]", player.role),
    PlayerType::AI => format!("{:?} to move ({} engine thinking...)", player.role, player.difficulty),
  }
}

/// Engine against engine without a terminal, recording every move.
pub fn run_headless(game: &mut Game, record_file: &str) -> Result<(), Box<dyn Error>> {
  let mut logger = GameLogger::new(record_file)?;

  println!("Starting AI vs AI game with logging...");
  println!("Record file: {}", record_file);
  println!("Black: {}  White: {}", game.black.difficulty, game.white.difficulty);
  println!();

  while !game.is_over() {
    let round = game.history().len() + 1;
    let role = game.to_move();
    logger.log_move_start(role, round)?;
    logger.log_board_state(game.board())?;
    logger.log_candidates(&game.board().candidate_moves(2))?;

    let decision = game.engine_move()?;
    logger.log_decision(&decision, &game.stats(role).unwrap_or_default())?;

    println!(
      "Move #{} {:?} -> ({}, {}) score: {:?} [{:?}]",
      round, role, decision.mv.x, decision.mv.y, decision.mv.score, decision.stage
    );

    // Small delay for readability
    thread::sleep(Duration::from_millis(100));
  }

  logger.log_board_state(game.board())?;
  logger.log_game_end(game.outcome(), game.history().len())?;

  println!("\nGame Over!");
  println!("Result: {}", describe(game.outcome()));
  println!("Total moves: {}", game.history().len());
  println!("\nSee {} for detailed analysis.", record_file);
  Ok(())
}
