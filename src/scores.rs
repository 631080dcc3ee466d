use crate::shapes::Shape;

pub struct Scores;

impl Scores {
  pub fn get(shape: Shape) -> i64 {
    match shape {
      Shape::FIVE => 100_000_000,
      Shape::VCF_WIN => 50_000_000,

      Shape::OPEN_FOUR => 5_000_000,
      Shape::DOUBLE_FOUR => 4_000_000,
      Shape::FOUR_THREE => 3_000_000,
      Shape::CLOSED_FOUR => 500_000,
      Shape::DEAD_FOUR => 100,

      Shape::DOUBLE_THREE => 400_000,
      Shape::OPEN_THREE => 50_000,
      Shape::JUMP_THREE => 30_000,
      Shape::CLOSED_THREE => 5_000,
      Shape::DEAD_THREE => 20,

      Shape::OPEN_TWO => 1_000,
      Shape::JUMP_TWO => 500,
      Shape::CLOSED_TWO => 100,
      Shape::DEAD_TWO => 3,

      Shape::ONE => 10,
    }
  }
}
