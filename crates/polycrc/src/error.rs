//! Error types for CRC operations.
//!
//! Every failure is a caller or configuration error and is reported before
//! any working buffer is touched. A frame that fails verification is *not*
//! an error: [`verify`](crate::verify) returns `Ok(false)` for it.

/// Errors reported by polycrc operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum CrcError {
  /// Generator bit sequence is empty or its leading bit is clear.
  #[error("invalid generator polynomial: leading bit must be set")]
  InvalidGenerator,

  /// `compute` was called with an empty payload.
  #[error("payload is empty")]
  EmptyPayload,

  /// Frame is shorter than the generator degree.
  #[error("frame of {len} bits is shorter than generator degree {degree}")]
  FrameTooShort {
    /// Frame length in bits.
    len: usize,
    /// Generator degree `r`.
    degree: usize,
  },

  /// A textual bit string contained something other than `0` or `1`.
  #[error("invalid bit {found:?} at index {index}")]
  InvalidBit {
    /// Character offset of the offending character.
    index: usize,
    /// The offending character.
    found: char,
  },

  /// Bit sequence cannot be packed into whole bytes.
  #[error("bit length {len} is not a multiple of 8")]
  NotByteAligned {
    /// Length in bits.
    len: usize,
  },

  /// Bit index past the end of a sequence.
  #[error("bit index {index} out of range for length {len}")]
  BitIndexOutOfRange {
    /// Requested index.
    index: usize,
    /// Sequence length in bits.
    len: usize,
  },

  /// Generator degree cannot be represented in a 64-bit register.
  #[error("generator degree {degree} is outside 1..=64")]
  UnsupportedDegree {
    /// The rejected degree.
    degree: usize,
  },
}
