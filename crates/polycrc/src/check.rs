//! Frame-check trait.
//!
//! [`FrameCheck`] is the seam between the long-division engine and any other
//! implementation of the same remainder. Harness code is written against the
//! trait so two implementations can judge the same corrupted frame and be
//! compared.
//!
//! # Implementor Requirements
//!
//! - `compute` fails with [`CrcError::EmptyPayload`] on an empty payload and
//!   returns exactly `degree()` bits otherwise
//! - `verify` fails with [`CrcError::FrameTooShort`] when the frame is shorter
//!   than `degree()` and is `Ok(true)` iff the frame is a multiple of the
//!   generator
//! - both are pure: identical inputs give identical outputs

use crate::{Bits, CrcEngine, CrcError, RegisterCrc};

/// A CRC that can produce and check frames.
pub trait FrameCheck {
  /// Checksum length in bits.
  fn degree(&self) -> usize;

  /// Remainder to append to `payload`.
  ///
  /// # Errors
  ///
  /// [`CrcError::EmptyPayload`] on an empty payload.
  fn compute(&self, payload: &[bool]) -> Result<Bits, CrcError>;

  /// `Ok(true)` if `frame` carries a matching checksum.
  ///
  /// # Errors
  ///
  /// [`CrcError::FrameTooShort`] if `frame.len() < degree()`.
  fn verify(&self, frame: &[bool]) -> Result<bool, CrcError>;

  /// Build `payload ‖ compute(payload)`.
  ///
  /// # Errors
  ///
  /// As [`compute`](Self::compute).
  #[inline]
  fn encode(&self, payload: &[bool]) -> Result<Bits, CrcError> {
    let remainder = self.compute(payload)?;
    Ok(Bits::from(payload).concat(&remainder))
  }
}

impl FrameCheck for CrcEngine {
  #[inline]
  fn degree(&self) -> usize {
    CrcEngine::degree(self)
  }

  #[inline]
  fn compute(&self, payload: &[bool]) -> Result<Bits, CrcError> {
    CrcEngine::compute(self, payload)
  }

  #[inline]
  fn verify(&self, frame: &[bool]) -> Result<bool, CrcError> {
    CrcEngine::verify(self, frame)
  }
}

impl FrameCheck for RegisterCrc {
  #[inline]
  fn degree(&self) -> usize {
    RegisterCrc::degree(self) as usize
  }

  fn compute(&self, payload: &[bool]) -> Result<Bits, CrcError> {
    if payload.is_empty() {
      return Err(CrcError::EmptyPayload);
    }
    Ok(self.remainder(payload))
  }

  /// Compares the remainder of the payload part with the trailing bits.
  ///
  /// Equivalent to a zero frame residue for every generator, including those
  /// without a constant term.
  fn verify(&self, frame: &[bool]) -> Result<bool, CrcError> {
    let degree = FrameCheck::degree(self);
    let Some(split) = frame.len().checked_sub(degree) else {
      return Err(CrcError::FrameTooShort { len: frame.len(), degree });
    };
    let (payload, checksum) = frame.split_at(split);
    Ok(self.remainder(payload).as_slice() == checksum)
  }
}
