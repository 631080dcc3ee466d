use clap::{Parser, ValueEnum};

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameModeArg {
  /// Human vs Human
  HumanHuman,
  /// Human vs AI
  HumanAi,
  /// AI vs AI, headless, with a per-move game record
  AiAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
  Black,
  White,
}

/// Gomoku with Renju restrictions for Black
#[derive(Parser, Debug)]
#[command(name = "gomoku_renju", version)]
pub struct CliArgs {
  /// Game mode
  #[arg(long, value_enum, default_value_t = GameModeArg::HumanAi)]
  pub mode: GameModeArg,

  /// Engine strength: easy, normal or hard (unknown names mean normal)
  #[arg(long, default_value = "normal")]
  pub difficulty: String,

  /// Side played by the human in human-ai mode
  #[arg(long, value_enum, default_value_t = ColorArg::Black)]
  pub color: ColorArg,

  /// Seed for reproducible engine play
  #[arg(long)]
  pub seed: Option<u64>,

  /// Log file for the interactive modes
  #[arg(long, default_value = "gomoku_renju.log")]
  pub log_file: String,

  /// Game record written in ai-ai mode
  #[arg(long, default_value = "gomoku_game.log")]
  pub record_file: String,
}
