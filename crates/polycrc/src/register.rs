//! Bit-serial shift-register CRC.
//!
//! An independent formulation of the same remainder: the division is folded
//! into a `degree`-bit register that absorbs one message bit per step
//! (MSB-first, init 0, no reflection, no final XOR). It never materialises the
//! augmented buffer, so it serves as a cross-check for
//! [`CrcEngine`](crate::CrcEngine) and as the bridge to byte-oriented CRC
//! catalogues.
//!
//! | Generator | Catalogue name | Check (`"123456789"`) |
//! |-----------|----------------|-----------------------|
//! | `0x07`, r=8 | CRC-8/SMBUS | `0xF4` |
//! | `0x8005`, r=16 | CRC-16/UMTS | `0xFEE8` |
//! | `0x1021`, r=16 | CRC-16/XMODEM | `0x31C3` |
//! | `0x814141AB`, r=32 | CRC-32/AIXM | `0x3010BF7F` |
//! | `0x42F0E1EBA9EA3693`, r=64 | CRC-64/ECMA-182 | `0x6C40DF5F0B497347` |

use crate::{Bits, CrcError, GeneratorPolynomial};

/// Shift-register CRC for generators of degree `1..=64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterCrc {
  poly: u64,
  degree: u32,
  top: u64,
  mask: u64,
}

impl RegisterCrc {
  /// Build a register for `generator`.
  ///
  /// # Errors
  ///
  /// [`CrcError::UnsupportedDegree`] unless `1 <= degree <= 64`.
  pub fn new(generator: &GeneratorPolynomial) -> Result<Self, CrcError> {
    let degree = generator.degree();
    let poly = generator.normal().ok_or(CrcError::UnsupportedDegree { degree })?;
    let degree = degree as u32;
    Ok(Self {
      poly,
      degree,
      top: 1u64 << (degree - 1),
      mask: u64::MAX >> (64 - degree),
    })
  }

  /// Register width in bits.
  #[inline]
  #[must_use]
  pub const fn degree(&self) -> u32 {
    self.degree
  }

  /// One-shot checksum of `data` from a zero register.
  ///
  /// The register state never leaves this type; there is no way to resume
  /// from a caller-held value:
  ///
  /// ```compile_fail
  /// use polycrc::{GeneratorPolynomial, RegisterCrc};
  ///
  /// let register = RegisterCrc::new(&GeneratorPolynomial::from_normal(0x1021, 16)?)?;
  /// let _ = register.update_bytes(0x31C3, b"more");
  /// # Ok::<(), polycrc::CrcError>(())
  /// ```
  #[must_use]
  pub fn checksum_bytes(&self, data: &[u8]) -> u64 {
    let mut crc = 0;
    for &byte in data {
      for shift in (0..8u32).rev() {
        crc = self.step(crc, (byte >> shift) & 1 == 1);
      }
    }
    crc
  }

  /// One-shot checksum of a bit sequence from a zero register.
  #[must_use]
  pub fn checksum_bits(&self, bits: &[bool]) -> u64 {
    bits.iter().fold(0, |crc, &bit| self.step(crc, bit))
  }

  /// Remainder of `payload` as `degree` bits, most significant first.
  #[must_use]
  pub fn remainder(&self, payload: &[bool]) -> Bits {
    Bits::from_u64(self.checksum_bits(payload), self.degree as usize)
  }

  #[inline]
  const fn step(&self, crc: u64, bit: bool) -> u64 {
    let feedback = ((crc & self.top) != 0) ^ bit;
    let shifted = (crc << 1) & self.mask;
    if feedback { shifted ^ self.poly } else { shifted }
  }
}
