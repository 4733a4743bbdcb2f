//! Error type for the laboratory.

use polycrc::CrcError;

/// Errors raised while injecting bursts, running studies or writing reports.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LabError {
  /// The underlying CRC operation rejected its input.
  #[error(transparent)]
  Crc(#[from] CrcError),

  /// A burst does not fit inside the frame.
  #[error("burst of {length} bits at {position:?} does not fit a {frame_len}-bit frame")]
  InvalidBurst {
    /// Requested burst length.
    length: usize,
    /// Requested start position, `None` when it was to be drawn at random.
    position: Option<usize>,
    /// Length of the frame the burst was aimed at.
    frame_len: usize,
  },

  /// Reading a config file or writing a report failed.
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// A config file or JSON report could not be (de)serialized.
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The configuration is inconsistent.
  #[error("invalid configuration: {0}")]
  Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = LabError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn crc_errors_pass_through() {
    let err = LabError::from(CrcError::EmptyPayload);
    assert_eq!(err.to_string(), CrcError::EmptyPayload.to_string());
  }

  #[test]
  fn invalid_burst_message() {
    let err = LabError::InvalidBurst { length: 9, position: Some(4), frame_len: 8 };
    assert_eq!(err.to_string(), "burst of 9 bits at Some(4) does not fit a 8-bit frame");
  }

  #[test]
  fn error_is_send_sync() {
    fn assert_bounds<T: Send + Sync + std::error::Error + 'static>() {}
    assert_bounds::<LabError>();
  }
}
