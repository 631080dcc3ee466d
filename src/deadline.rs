use std::time::{Duration, Instant};

/// Wall-clock budget for one search, polled every `cadence` nodes.
///
/// Once expired it stays expired; callers fall back to a static
/// evaluation instead of failing.
#[derive(Debug, Clone)]
pub struct Deadline {
  start: Instant,
  budget: Duration,
  cadence: u64,
  polls: u64,
  expired: bool,
}

impl Deadline {
  pub fn new(budget: Duration, cadence: u64) -> Self {
    Self {
      start: Instant::now(),
      budget,
      cadence: cadence.max(1),
      polls: 0,
      expired: false,
    }
  }

  /// A deadline sharing this one's start but allowed only `percent` of its budget.
  pub fn share(&self, percent: u32, cadence: u64) -> Self {
    Self {
      start: self.start,
      budget: self.budget * percent / 100,
      cadence: cadence.max(1),
      polls: 0,
      expired: self.expired,
    }
  }

  /// Count one node; look at the clock only every `cadence` nodes.
  pub fn poll(&mut self) -> bool {
    if self.expired {
      return true;
    }
    self.polls += 1;
    if self.polls % self.cadence == 0 && self.start.elapsed() > self.budget {
      self.expired = true;
    }
    self.expired
  }

  pub fn is_expired(&self) -> bool {
    self.expired
  }

  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero_budget_expires_on_cadence() {
    let mut deadline = Deadline::new(Duration::ZERO, 3);
    std::thread::sleep(Duration::from_millis(2));
    assert!(!deadline.poll());
    assert!(!deadline.poll());
    assert!(deadline.poll());
    assert!(deadline.is_expired());
    assert!(deadline.poll());
  }

  #[test]
  fn test_generous_budget_never_expires() {
    let mut deadline = Deadline::new(Duration::from_secs(3600), 1);
    for _ in 0..100 {
      assert!(!deadline.poll());
    }
  }

  #[test]
  fn test_share_scales_budget() {
    let deadline = Deadline::new(Duration::from_millis(1000), 10);
    let share = deadline.share(30, 1);
    assert_eq!(share.budget, Duration::from_millis(300));
    assert_eq!(share.start, deadline.start);
  }
}
