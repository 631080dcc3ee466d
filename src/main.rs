mod cli;
mod game_logger;
mod session;
mod terminal_ui;

use crate::cli::{CliArgs, ColorArg, GameModeArg};
use clap::Parser;
use gomoku_renju::difficulty::Difficulty;
use gomoku_renju::game::Game;
use gomoku_renju::player::{Player, Role};
use log::LevelFilter;
use simplelog::WriteLogger;
use std::error::Error;
use std::fs::File;

fn main() -> Result<(), Box<dyn Error>> {
  let args = CliArgs::parse();
  let difficulty = Difficulty::from_name(&args.difficulty);

  let (black, white) = match args.mode {
    GameModeArg::HumanHuman => (Player::human(Role::Black), Player::human(Role::White)),
    GameModeArg::HumanAi => match args.color {
      ColorArg::Black => (Player::human(Role::Black), Player::ai(Role::White, difficulty)),
      ColorArg::White => (Player::ai(Role::Black, difficulty), Player::human(Role::White)),
    },
    GameModeArg::AiAi => (Player::ai(Role::Black, difficulty), Player::ai(Role::White, difficulty)),
  };
  let mut game = Game::new(black, white, args.seed);

  match args.mode {
    GameModeArg::AiAi => {
      env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
      session::run_headless(&mut game, &args.record_file)?;
    }
    // The alternate screen owns stdout, so logs go to a file
    _ => {
      WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), File::create(&args.log_file)?)?;
      session::run_interactive(&mut game)?;
    }
  }
  Ok(())
}
