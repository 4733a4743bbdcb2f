//! Burst error injection.
//!
//! A burst of length `b` corrupts a contiguous window of `b` bits. Two
//! models are available:
//!
//! | Kind | Window effect |
//! |------|---------------|
//! | [`BurstKind::Invert`] | every bit in the window is inverted |
//! | [`BurstKind::Random`] | first and last bit inverted, interior bits inverted with probability 1/2 |
//!
//! `Random` is the classical burst model behind the `2^-r` escape estimate;
//! `Invert` always produces the all-ones error pattern of its length.

use core::{fmt, str::FromStr};

use polycrc::Bits;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{LabError, Result};

/// How the bits inside a burst window are corrupted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstKind {
  /// Invert the whole window.
  #[default]
  Invert,

  /// Invert both end bits and a random subset of the interior.
  Random,
}

impl BurstKind {
  /// Parse a kind from its name.
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    match s.to_lowercase().as_str() {
      "invert" | "inverted" | "ones" => Some(Self::Invert),
      "random" | "classic" => Some(Self::Random),
      _ => None,
    }
  }

  /// Canonical lowercase name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Invert => "invert",
      Self::Random => "random",
    }
  }
}

impl FromStr for BurstKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s).ok_or_else(|| format!("unknown burst kind: {s} (expected invert or random)"))
  }
}

impl fmt::Display for BurstKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A corrupted copy of a frame and where the burst landed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Burst {
  /// The frame after corruption.
  pub corrupted: Bits,
  /// Index of the first bit of the window.
  pub position: usize,
  /// Window length in bits.
  pub length: usize,
}

/// Corrupt a window of `length` bits of `frame`.
///
/// With `position == None` the start is drawn uniformly from
/// `0..=frame.len() - length`. The input frame is left untouched.
///
/// # Errors
///
/// [`LabError::InvalidBurst`] when `length` is zero, exceeds the frame, or
/// the explicit position leaves the window hanging off the end.
pub fn inject_burst<R: Rng>(
  frame: &[bool],
  length: usize,
  position: Option<usize>,
  kind: BurstKind,
  rng: &mut R,
) -> Result<Burst> {
  let frame_len = frame.len();
  let invalid = || LabError::InvalidBurst { length, position, frame_len };

  if length == 0 || length > frame_len {
    return Err(invalid());
  }
  let last_start = frame_len - length;
  let start = match position {
    Some(p) if p <= last_start => p,
    Some(_) => return Err(invalid()),
    None => rng.random_range(0..=last_start),
  };

  let mut corrupted = Bits::from(frame);
  let window = corrupted.as_mut_slice().get_mut(start..start + length).ok_or_else(invalid)?;
  let end = length - 1;
  for (offset, bit) in window.iter_mut().enumerate() {
    let flip = match kind {
      BurstKind::Invert => true,
      BurstKind::Random => offset == 0 || offset == end || rng.random_bool(0.5),
    };
    if flip {
      *bit = !*bit;
    }
  }

  Ok(Burst { corrupted, position: start, length })
}

/// The `length` bits of `bits` starting at `position`, clipped to the input.
#[must_use]
pub fn window(bits: &[bool], position: usize, length: usize) -> Bits {
  bits.iter().skip(position).take(length).copied().collect()
}

/// XOR of the `[position, position + length)` windows of two frames.
///
/// A `1` marks every bit the burst actually changed.
#[must_use]
pub fn error_pattern(original: &[bool], corrupted: &[bool], position: usize, length: usize) -> Bits {
  original.iter().zip(corrupted).skip(position).take(length).map(|(a, b)| a ^ b).collect()
}
