//! Single-frame operations behind the `checksum` and `verify` commands.

use polycrc::{Bits, CrcEngine, GeneratorPolynomial};
use serde::Serialize;

use crate::Result;

/// A payload with its CRC appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Encoded {
  /// Generator bit string.
  pub generator: String,
  /// Payload bits.
  pub payload: String,
  /// Remainder, `r` bits.
  pub crc: String,
  /// `payload ‖ crc`.
  pub frame: String,
}

/// The result of checking a received frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
  /// Generator bit string.
  pub generator: String,
  /// Frame bits as received.
  pub frame: String,
  /// Remainder of the frame; all zeros iff valid.
  pub residue: String,
  /// Whether the frame passes.
  pub valid: bool,
}

/// Compute the CRC of `payload` and build the frame.
///
/// # Errors
///
/// [`polycrc::CrcError::EmptyPayload`] for an empty payload.
pub fn encode(generator: &GeneratorPolynomial, payload: &Bits) -> Result<Encoded> {
  let engine = CrcEngine::new(generator.clone());
  let crc = engine.compute(payload)?;
  let frame = payload.clone().concat(&crc);
  Ok(Encoded {
    generator: generator.to_string(),
    payload: payload.to_string(),
    crc: crc.to_string(),
    frame: frame.to_string(),
  })
}

/// Divide `frame` by `generator` and report the remainder.
///
/// # Errors
///
/// [`polycrc::CrcError::FrameTooShort`] when the frame is shorter than `r`.
pub fn check(generator: &GeneratorPolynomial, frame: &Bits) -> Result<Verdict> {
  let residue = polycrc::residue(frame, generator)?;
  Ok(Verdict {
    generator: generator.to_string(),
    frame: frame.to_string(),
    valid: residue.is_zero(),
    residue: residue.to_string(),
  })
}
