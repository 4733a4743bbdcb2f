//! CRC by explicit GF(2) long division.
//!
//! Both public operations run one primitive, [`divide`], over a working
//! buffer owned by the call:
//!
//! | Operation | Buffer | Trailing `r` bits start as |
//! |-----------|--------|----------------------------|
//! | [`CrcEngine::compute`] | `payload ‖ 0^r` | zeros (placeholder) |
//! | [`CrcEngine::verify`] | `frame` | the transmitted checksum |
//!
//! The scan visits every position except the last `r`. Wherever the current
//! bit is set, the generator is XORed into the window starting there, which
//! clears that bit and rewrites the `r` bits after it. The last `r` bits of the
//! buffer are then the remainder.
//!
//! # Example
//!
//! ```
//! use polycrc::{Bits, CrcEngine};
//!
//! let engine = CrcEngine::new("10011".parse().unwrap());
//! let payload: Bits = "1101011111".parse().unwrap();
//!
//! let crc = engine.compute(&payload).unwrap();
//! assert_eq!(crc.to_string(), "0010");
//!
//! let frame = payload.concat(&crc);
//! assert!(engine.verify(&frame).unwrap());
//! ```
//!
//! # Cost
//!
//! `O(len × r)` bit operations, one buffer of `len + r` (compute) or `len`
//! (verify) bits per call. Calls share nothing and may run concurrently.

use crate::{Bits, CrcError, GeneratorPolynomial, bits::is_zero};

/// Divides the working buffer in place and returns its remainder window.
///
/// `generator` must be non-empty; callers guarantee `buffer.len() >= r`.
fn divide<'a>(buffer: &'a mut [bool], generator: &[bool]) -> &'a [bool] {
  let degree = generator.len().saturating_sub(1);
  let steps = buffer.len().saturating_sub(degree);

  for i in 0..steps {
    let Some(window) = buffer.get_mut(i..i + generator.len()) else {
      break;
    };
    if window.first() == Some(&true) {
      for (bit, &coeff) in window.iter_mut().zip(generator) {
        *bit ^= coeff;
      }
    }
  }

  buffer.get(steps..).unwrap_or(&[])
}

/// Long-division CRC engine bound to one generator polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrcEngine {
  generator: GeneratorPolynomial,
}

impl CrcEngine {
  /// Bind an engine to `generator`.
  #[inline]
  #[must_use]
  pub const fn new(generator: GeneratorPolynomial) -> Self {
    Self { generator }
  }

  /// The generator this engine divides by.
  #[inline]
  #[must_use]
  pub const fn generator(&self) -> &GeneratorPolynomial {
    &self.generator
  }

  /// Checksum length `r` in bits.
  #[inline]
  #[must_use]
  pub fn degree(&self) -> usize {
    self.generator.degree()
  }

  /// Compute the `r`-bit remainder of `payload · x^r`.
  ///
  /// A degree-0 generator yields the empty remainder.
  ///
  /// # Errors
  ///
  /// [`CrcError::EmptyPayload`] if `payload` is empty.
  #[inline]
  pub fn compute(&self, payload: &[bool]) -> Result<Bits, CrcError> {
    compute(payload, &self.generator)
  }

  /// Build the frame `payload ‖ compute(payload)`.
  ///
  /// # Errors
  ///
  /// As [`compute`](Self::compute).
  pub fn encode(&self, payload: &[bool]) -> Result<Bits, CrcError> {
    let remainder = self.compute(payload)?;
    Ok(Bits::from(payload).concat(&remainder))
  }

  /// Divide a whole frame and return the `r`-bit residue.
  ///
  /// The residue is all zero exactly when the frame is a multiple of the
  /// generator.
  ///
  /// # Errors
  ///
  /// [`CrcError::FrameTooShort`] if `frame.len() < r`.
  #[inline]
  pub fn residue(&self, frame: &[bool]) -> Result<Bits, CrcError> {
    residue(frame, &self.generator)
  }

  /// Check a frame carrying its checksum in the trailing `r` bits.
  ///
  /// Returns `Ok(false)` for a corrupted frame; that is the detection
  /// signal, not an error. Always `Ok(true)` for a degree-0 generator.
  ///
  /// # Errors
  ///
  /// [`CrcError::FrameTooShort`] if `frame.len() < r`.
  #[inline]
  pub fn verify(&self, frame: &[bool]) -> Result<bool, CrcError> {
    Ok(is_zero(&residue(frame, &self.generator)?))
  }
}

/// Compute the remainder of `payload` under `generator`.
///
/// # Errors
///
/// [`CrcError::EmptyPayload`] if `payload` is empty.
pub fn compute(payload: &[bool], generator: &GeneratorPolynomial) -> Result<Bits, CrcError> {
  if payload.is_empty() {
    return Err(CrcError::EmptyPayload);
  }
  let mut buffer = Bits::from(payload).concat(&Bits::zeros(generator.degree()));
  Ok(Bits::from(divide(buffer.as_mut_slice(), generator.bits())))
}

/// Residue of the whole `frame` under `generator`.
///
/// # Errors
///
/// [`CrcError::FrameTooShort`] if `frame.len() < generator.degree()`.
pub fn residue(frame: &[bool], generator: &GeneratorPolynomial) -> Result<Bits, CrcError> {
  let degree = generator.degree();
  if frame.len() < degree {
    return Err(CrcError::FrameTooShort { len: frame.len(), degree });
  }
  let mut buffer = Bits::from(frame);
  Ok(Bits::from(divide(buffer.as_mut_slice(), generator.bits())))
}

/// Verify `frame` under `generator`: `true` iff the residue is all zero.
///
/// # Errors
///
/// [`CrcError::FrameTooShort`] if `frame.len() < generator.degree()`.
pub fn verify(frame: &[bool], generator: &GeneratorPolynomial) -> Result<bool, CrcError> {
  Ok(is_zero(&residue(frame, generator)?))
}
