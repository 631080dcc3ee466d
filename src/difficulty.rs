use std::fmt;
use std::time::Duration;

/// Engine strength levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
  Easy,
  Normal,
  Hard,
}

/// Search parameters for one difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
  /// Minimax depth in plies
  pub depth: u32,
  /// Root branching limit; inner nodes use max(12, limit - depth)
  pub candidate_limit: usize,
  /// Chance of replacing the minimax choice by one of the top few candidates
  pub random_factor: f64,
  /// Forced-win search depth; 0 disables it
  pub vcf_depth: i32,
  pub time_limit: Duration,
  /// Weaker defense: random block skipping, no advanced threat blocking
  pub skip_defense: bool,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

  /// Case-insensitive lookup; unknown names fall back to `Normal`.
  pub fn from_name(name: &str) -> Self {
    match name.trim().to_ascii_lowercase().as_str() {
      "easy" => Difficulty::Easy,
      "hard" => Difficulty::Hard,
      _ => Difficulty::Normal,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Normal => "normal",
      Difficulty::Hard => "hard",
    }
  }

  pub fn config(&self) -> DifficultyConfig {
    match self {
      Difficulty::Easy => DifficultyConfig {
        depth: 2,
        candidate_limit: 6,
        random_factor: 0.50,
        vcf_depth: 0,
        time_limit: Duration::from_millis(1000),
        skip_defense: true,
      },
      Difficulty::Normal => DifficultyConfig {
        depth: 4,
        candidate_limit: 10,
        random_factor: 0.25,
        vcf_depth: 0,
        time_limit: Duration::from_millis(2000),
        skip_defense: true,
      },
      Difficulty::Hard => DifficultyConfig {
        depth: 6,
        candidate_limit: 18,
        random_factor: 0.0,
        vcf_depth: 10,
        time_limit: Duration::from_millis(4000),
        skip_defense: false,
      },
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_name_falls_back_to_normal() {
    assert_eq!(Difficulty::from_name("easy"), Difficulty::Easy);
    assert_eq!(Difficulty::from_name(" HARD "), Difficulty::Hard);
    assert_eq!(Difficulty::from_name("grandmaster"), Difficulty::Normal);
    assert_eq!(Difficulty::from_name(""), Difficulty::Normal);
  }

  #[test]
  fn test_only_hard_has_full_defense_and_vcf() {
    for difficulty in Difficulty::ALL {
      let config = difficulty.config();
      assert_eq!(config.skip_defense, difficulty != Difficulty::Hard);
      assert_eq!(config.vcf_depth > 0, difficulty == Difficulty::Hard);
    }
  }

  #[test]
  fn test_names_round_trip() {
    for difficulty in Difficulty::ALL {
      assert_eq!(Difficulty::from_name(difficulty.name()), difficulty);
    }
  }
}
