//! Detection investigation.
//!
//! Encode a message, corrupt the frame with short bursts and record whether
//! each corruption is caught. Every corrupted frame is judged twice: by the
//! long-division engine and, when the generator fits in 64 bits, by the
//! shift-register reference. The two must agree; a disagreement is an
//! implementation fault and is logged at `error` level.

use core::ops::RangeInclusive;

use polycrc::{Bits, CrcEngine, FrameCheck, RegisterCrc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{BurstKind, LabConfig, LabError, Result, TrialSummary, inject_burst};

/// Outcome of one corrupted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
  /// 1-based trial number.
  pub trial: usize,
  /// First corrupted bit.
  pub position: usize,
  /// Burst length.
  pub burst_bits: usize,
  /// Whether the engine rejected the corrupted frame.
  pub engine_detected: bool,
  /// Whether the reference rejected it; `None` if the reference did not run.
  pub reference_detected: Option<bool>,
}

impl TrialRecord {
  /// Both judgements present and different.
  #[inline]
  #[must_use]
  pub fn disagrees(&self) -> bool {
    self.reference_detected.is_some_and(|reference| reference != self.engine_detected)
  }
}

/// A completed investigation.
#[derive(Clone, Debug, Serialize)]
pub struct Investigation {
  /// Encoded text.
  pub message: String,
  /// Generator bit string.
  pub generator: String,
  /// Generator in `x^k` notation.
  pub polynomial: String,
  /// CRC length `r`.
  pub degree: usize,
  /// Remainder of the clean message.
  pub crc: String,
  /// Transmitted frame length.
  pub frame_bits: usize,
  /// Burst model.
  pub burst_kind: BurstKind,
  /// One entry per trial.
  pub records: Vec<TrialRecord>,
  /// Miss counts.
  pub summary: TrialSummary,
}

/// Inject `trials` bursts into `frame` and judge each with `primary` and,
/// if given, `reference`.
///
/// Burst lengths are drawn uniformly from `lengths`.
///
/// # Errors
///
/// [`LabError::InvalidBurst`] if a drawn length does not fit the frame,
/// [`LabError::Crc`] if either check rejects the frame shape.
pub fn run_trials<C: FrameCheck, R: Rng>(
  primary: &C,
  reference: Option<&dyn FrameCheck>,
  frame: &[bool],
  trials: usize,
  lengths: RangeInclusive<usize>,
  kind: BurstKind,
  rng: &mut R,
) -> Result<(Vec<TrialRecord>, TrialSummary)> {
  if lengths.is_empty() {
    return Err(LabError::Config(format!("empty burst range {}..={}", lengths.start(), lengths.end())));
  }

  let mut records = Vec::with_capacity(trials);
  let mut summary =
    TrialSummary { trials, reference_missed: reference.map(|_| 0), ..TrialSummary::default() };

  for trial in 1..=trials {
    let length = rng.random_range(lengths.clone());
    let burst = inject_burst(frame, length, None, kind, rng)?;

    let engine_detected = !primary.verify(&burst.corrupted)?;
    let reference_detected = match reference {
      Some(check) => Some(!check.verify(&burst.corrupted)?),
      None => None,
    };

    let record =
      TrialRecord { trial, position: burst.position, burst_bits: length, engine_detected, reference_detected };
    debug!(trial, position = record.position, length, engine_detected, ?reference_detected, "trial");

    if !engine_detected {
      summary.engine_missed += 1;
    }
    if let (Some(missed), Some(false)) = (summary.reference_missed.as_mut(), reference_detected) {
      *missed += 1;
    }
    if record.disagrees() {
      summary.disagreements += 1;
      error!(
        trial,
        position = record.position,
        length,
        engine_detected,
        ?reference_detected,
        "engine and reference disagree"
      );
    }
    records.push(record);
  }

  Ok((records, summary))
}

/// Run the investigation described by `config`.
///
/// # Errors
///
/// As [`run_trials`], plus generator resolution failures.
pub fn investigate<R: Rng>(config: &LabConfig, rng: &mut R) -> Result<Investigation> {
  let generator = config.generator()?;
  let engine = CrcEngine::new(generator.clone());
  let reference = match RegisterCrc::new(&generator) {
    Ok(register) => Some(register),
    Err(err) => {
      debug!(%err, "shift-register reference unavailable");
      None
    }
  };

  let payload = config.message_bits();
  let crc = engine.compute(&payload)?;
  let frame: Bits = payload.concat(&crc);

  let inv = &config.investigation;
  let (records, summary) = run_trials(
    &engine,
    reference.as_ref().map(|r| r as &dyn FrameCheck),
    &frame,
    inv.trials,
    inv.burst_min..=inv.burst_max,
    config.burst_kind,
    rng,
  )?;

  info!(
    trials = summary.trials,
    engine_missed = summary.engine_missed,
    reference_missed = ?summary.reference_missed,
    disagreements = summary.disagreements,
    "investigation finished"
  );

  Ok(Investigation {
    message: config.message.clone(),
    generator: generator.to_string(),
    polynomial: generator.algebraic(),
    degree: engine.degree(),
    crc: crc.to_string(),
    frame_bits: frame.len(),
    burst_kind: config.burst_kind,
    records,
    summary,
  })
}
