//! Undetected-error search.
//!
//! Bursts longer than the CRC can slip through: the check misses an error
//! exactly when its pattern is a multiple of the generator. This module
//! fires random bursts of lengths just above `r` at a frame and collects the
//! ones that verify clean, until a configured number has been found.
//!
//! For a generator with a constant term, a burst of length `<= r` can never
//! escape. If one does anyway it is recorded as a fault rather than an
//! escape.

use polycrc::{Bits, CrcEngine, GeneratorPolynomial};
use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::{error, info, warn};

use crate::{
  BurstKind, DetectionTally, LabConfig, Result, SearchConfig, error_pattern, expected_escape_rate, inject_burst, window,
};

/// A corrupted frame that verified as valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UndetectedError {
  /// First corrupted bit.
  pub position: usize,
  /// Burst length.
  pub length: usize,
  /// Bits that changed inside the window.
  #[serde(serialize_with = "as_text")]
  pub pattern: Bits,
  /// Window before corruption.
  #[serde(serialize_with = "as_text")]
  pub original: Bits,
  /// Window after corruption.
  #[serde(serialize_with = "as_text")]
  pub corrupted: Bits,
}

/// Tally for one burst length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LengthTally {
  /// Burst length.
  pub length: usize,
  /// Attempts and escapes at this length.
  #[serde(flatten)]
  pub tally: DetectionTally,
}

/// A completed search.
#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome {
  /// Encoded text.
  pub message: String,
  /// Generator bit string.
  pub generator: String,
  /// Generator in `x^k` notation.
  pub polynomial: String,
  /// CRC length `r`.
  pub degree: usize,
  /// Transmitted frame length.
  pub frame_bits: usize,
  /// Remainder of the clean message.
  pub crc: String,
  /// Burst model.
  pub burst_kind: BurstKind,
  /// Corrupted frames checked.
  pub total_tests: usize,
  /// Per-length tallies, in the order searched.
  pub per_length: Vec<LengthTally>,
  /// Escapes collected, at most `limit`.
  pub escapes: Vec<UndetectedError>,
  /// Escapes that the burst guarantee rules out.
  pub faults: Vec<UndetectedError>,
  /// `2^-r`.
  pub expected_escape_rate: f64,
}

impl SearchOutcome {
  /// Escapes over all tests.
  #[must_use]
  pub fn observed_escape_rate(&self) -> f64 {
    let undetected: usize = self.per_length.iter().map(|t| t.tally.undetected).sum();
    if self.total_tests == 0 {
      return 0.0;
    }
    undetected as f64 / self.total_tests as f64
  }
}

fn as_text<S: Serializer>(bits: &Bits, serializer: S) -> core::result::Result<S::Ok, S::Error> {
  serializer.collect_str(bits)
}

/// Search `frame` for bursts that `engine` fails to detect.
///
/// Lengths run from `params.min_length` to `params.max_length`, with
/// `params.attempts_per_length` random injections each, stopping early once
/// `params.limit` escapes are held.
///
/// # Errors
///
/// [`crate::LabError::InvalidBurst`] when a length exceeds the frame.
pub fn search_frame<R: Rng>(
  engine: &CrcEngine,
  frame: &[bool],
  params: &SearchConfig,
  kind: BurstKind,
  rng: &mut R,
) -> Result<(Vec<LengthTally>, Vec<UndetectedError>, Vec<UndetectedError>)> {
  let degree = engine.degree();
  let guaranteed = engine.generator().has_constant_term();
  let mut per_length = Vec::new();
  let mut escapes = Vec::new();
  let mut faults = Vec::new();

  'lengths: for length in params.min_length..=params.max_length {
    let mut tally = DetectionTally::default();

    for _ in 0..params.attempts_per_length {
      let burst = inject_burst(frame, length, None, kind, rng)?;
      let detected = !engine.verify(&burst.corrupted)?;
      tally.record(detected);
      if detected {
        continue;
      }

      let found = UndetectedError {
        position: burst.position,
        length,
        pattern: error_pattern(frame, &burst.corrupted, burst.position, length),
        original: window(frame, burst.position, length),
        corrupted: window(&burst.corrupted, burst.position, length),
      };

      if guaranteed && length <= degree {
        error!(position = found.position, length, pattern = %found.pattern, "burst within degree escaped");
        faults.push(found);
        continue;
      }

      warn!(position = found.position, length, pattern = %found.pattern, "undetected burst");
      escapes.push(found);
      if escapes.len() >= params.limit {
        per_length.push(LengthTally { length, tally });
        break 'lengths;
      }
    }

    if tally.undetected > 0 {
      info!(length, undetected = tally.undetected, attempts = tally.attempts, "escapes at length");
    }
    per_length.push(LengthTally { length, tally });
  }

  Ok((per_length, escapes, faults))
}

/// Run the search described by `config`.
///
/// # Errors
///
/// As [`search_frame`], plus generator resolution failures.
pub fn search<R: Rng>(config: &LabConfig, rng: &mut R) -> Result<SearchOutcome> {
  let generator: GeneratorPolynomial = config.search_generator()?;
  let engine = CrcEngine::new(generator.clone());

  let payload = config.message_bits();
  let crc = engine.compute(&payload)?;
  let frame = payload.concat(&crc);

  let (per_length, escapes, faults) = search_frame(&engine, &frame, &config.search, config.burst_kind, rng)?;
  let total_tests = per_length.iter().map(|t| t.tally.attempts).sum();

  info!(total_tests, escapes = escapes.len(), faults = faults.len(), "search finished");

  Ok(SearchOutcome {
    message: config.message.clone(),
    generator: generator.to_string(),
    polynomial: generator.algebraic(),
    degree: engine.degree(),
    frame_bits: frame.len(),
    crc: crc.to_string(),
    burst_kind: config.burst_kind,
    total_tests,
    per_length,
    escapes,
    faults,
    expected_escape_rate: expected_escape_rate(engine.degree()),
  })
}
