//! Wall-clock comparison of long division against the shift register.
//!
//! One measurement per size, on fresh random data. This is a coarse
//! side-by-side for reports; the criterion suite in `polycrc/benches` is the
//! place for statistically sound numbers.
//!
//! Memory is reported as the working set each formulation needs beyond the
//! packed input bytes: long division unpacks the payload to one `bool` per
//! bit and copies it into the augmented dividend, while the register reads
//! the bytes in place and carries a single `u64`.

use std::time::Instant;

use polycrc::{Bits, CrcEngine, GeneratorPolynomial, RegisterCrc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::Result;

/// Timings for one payload size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Timing {
  /// Payload size in bytes.
  pub size_bytes: usize,
  /// Seconds spent in `CrcEngine::compute`.
  pub division_secs: f64,
  /// Seconds spent in `RegisterCrc::checksum_bytes`.
  pub register_secs: f64,
  /// Working bytes held by the division.
  pub division_bytes: usize,
  /// Working bytes held by the register.
  pub register_bytes: usize,
  /// Whether both produced the same remainder.
  pub agree: bool,
}

impl Timing {
  /// How many times faster the register was; `0.0` if it took no time.
  #[must_use]
  pub fn speedup(&self) -> f64 {
    if self.register_secs <= 0.0 {
      return 0.0;
    }
    self.division_secs / self.register_secs
  }
}

/// Bytes of the unpacked payload plus the augmented dividend.
#[must_use]
pub fn division_working_bytes(size_bytes: usize, degree: usize) -> usize {
  let payload_bits = size_bytes.saturating_mul(8);
  payload_bits.saturating_mul(2).saturating_add(degree).saturating_mul(size_of::<bool>())
}

/// Bytes of register state, independent of the payload size.
#[must_use]
pub const fn register_working_bytes() -> usize {
  size_of::<u64>()
}

/// A completed comparison.
#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
  /// Generator bit string.
  pub generator: String,
  /// CRC length `r`.
  pub degree: usize,
  /// One entry per size, in input order.
  pub timings: Vec<Timing>,
}

/// Time both formulations on random payloads of each size.
///
/// # Errors
///
/// [`polycrc::CrcError::UnsupportedDegree`] for generators the register
/// cannot hold, [`polycrc::CrcError::EmptyPayload`] for a zero size.
pub fn compare<R: Rng>(generator: &GeneratorPolynomial, sizes: &[usize], rng: &mut R) -> Result<Comparison> {
  let engine = CrcEngine::new(generator.clone());
  let register = RegisterCrc::new(generator)?;

  let mut timings = Vec::with_capacity(sizes.len());
  for &size_bytes in sizes {
    let mut data = vec![0u8; size_bytes];
    rng.fill(data.as_mut_slice());
    let bits = Bits::from_bytes(&data);

    let start = Instant::now();
    let by_division = engine.compute(&bits)?;
    let division_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let by_register = register.checksum_bytes(&data);
    let register_secs = start.elapsed().as_secs_f64();

    let agree = by_division.to_u64() == Some(by_register);
    if !agree {
      error!(size_bytes, division = %by_division, register = by_register, "remainders differ");
    }
    debug!(size_bytes, division_secs, register_secs, "timed");
    timings.push(Timing {
      size_bytes,
      division_secs,
      register_secs,
      division_bytes: division_working_bytes(size_bytes, engine.degree()),
      register_bytes: register_working_bytes(),
      agree,
    });
  }

  info!(sizes = timings.len(), "comparison finished");
  Ok(Comparison { generator: generator.to_string(), degree: engine.degree(), timings })
}
