//! Detection counters and the theoretical escape estimate.
//!
//! For a degree-`r` generator with a constant term every burst of length
//! `<= r` is detected. Longer bursts escape only when the error pattern is a
//! multiple of the generator; under the classical burst model this happens
//! with probability close to `2^-r`:
//!
//! | Burst length `b` | Escape probability |
//! |------------------|--------------------|
//! | `b <= r`         | 0 |
//! | `b == r + 1`     | `2^-(r-1)` |
//! | `b > r + 1`      | `2^-r` |
//!
//! The `2^-r` figure is what [`expected_escape_rate`] returns and what the
//! reports quote; the `r + 1` row is why short-burst searches may see
//! roughly twice as many escapes.

use serde::Serialize;

/// Attempts and misses for one class of injected error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DetectionTally {
  /// Number of corrupted frames checked.
  pub attempts: usize,

  /// How many of them verified as valid.
  pub undetected: usize,
}

impl DetectionTally {
  /// Count one checked frame.
  #[inline]
  pub fn record(&mut self, detected: bool) {
    self.attempts += 1;
    if !detected {
      self.undetected += 1;
    }
  }

  /// Frames whose corruption was caught.
  #[inline]
  #[must_use]
  pub const fn detected(&self) -> usize {
    self.attempts - self.undetected
  }

  /// Fraction of attempts that escaped, `0.0` with no attempts.
  #[must_use]
  pub fn escape_rate(&self) -> f64 {
    if self.attempts == 0 {
      return 0.0;
    }
    self.undetected as f64 / self.attempts as f64
  }
}

/// `2^-degree`, the long-burst escape estimate.
#[must_use]
pub fn expected_escape_rate(degree: usize) -> f64 {
  let exponent = i32::try_from(degree).unwrap_or(i32::MAX);
  0.5f64.powi(exponent)
}

/// Per-implementation miss counts over an investigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrialSummary {
  /// Trials run.
  pub trials: usize,

  /// Trials the long-division engine failed to detect.
  pub engine_missed: usize,

  /// Trials the shift-register reference failed to detect, if it ran.
  pub reference_missed: Option<usize>,

  /// Trials where the two judgements differed.
  pub disagreements: usize,
}
