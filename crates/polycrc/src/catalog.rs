//! Named generator polynomials.
//!
//! | Preset | Bits | Degree | Notes |
//! |--------|------|--------|-------|
//! | [`Preset::Textbook`] | `10011` | 4 | `x^4 + x + 1`, the classic worked example |
//! | [`Preset::Crc8`] | `0x07` | 8 | CRC-8/SMBUS polynomial |
//! | [`Preset::Crc16Ibm`] | `0x8005` | 16 | CRC-16/IBM (ARC, UMTS) polynomial |
//! | [`Preset::Crc16Ccitt`] | `0x1021` | 16 | CRC-16/CCITT polynomial |
//! | [`Preset::Study16`] | `10011000000010001` | 16 | `x^16 + x^13 + x^12 + x^4 + 1`, burst study |
//! | [`Preset::Crc32`] | `0x04C11DB7` | 32 | CRC-32 (Ethernet) polynomial |
//!
//! Only the polynomial is fixed here; division always starts from a zero
//! register with no reflection or final XOR.

use core::fmt;

use crate::{CrcError, GeneratorPolynomial};

const TEXTBOOK_BITS: &str = "10011";
const CRC8_BITS: &str = "100000111";
const CRC16_IBM_BITS: &str = "11000000000000101";
const CRC16_CCITT_BITS: &str = "10001000000100001";
const STUDY16_BITS: &str = "10011000000010001";
const CRC32_BITS: &str = "100000100110000010001110110110111";

/// A named generator polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
  /// `x^4 + x + 1`.
  Textbook,
  /// CRC-8, `0x07`.
  Crc8,
  /// CRC-16/IBM, `0x8005`.
  Crc16Ibm,
  /// CRC-16/CCITT, `0x1021`.
  Crc16Ccitt,
  /// `x^16 + x^13 + x^12 + x^4 + 1`.
  Study16,
  /// CRC-32, `0x04C11DB7`.
  Crc32,
}

impl Preset {
  /// Every preset, lowest degree first.
  pub const ALL: [Self; 6] = [Self::Textbook, Self::Crc8, Self::Crc16Ibm, Self::Crc16Ccitt, Self::Study16, Self::Crc32];

  /// Stable lowercase name.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Textbook => "textbook",
      Self::Crc8 => "crc-8",
      Self::Crc16Ibm => "crc-16-ibm",
      Self::Crc16Ccitt => "crc-16-ccitt",
      Self::Study16 => "study-16",
      Self::Crc32 => "crc-32",
    }
  }

  /// Coefficient bits, highest term first.
  #[must_use]
  pub const fn bits(self) -> &'static str {
    match self {
      Self::Textbook => TEXTBOOK_BITS,
      Self::Crc8 => CRC8_BITS,
      Self::Crc16Ibm => CRC16_IBM_BITS,
      Self::Crc16Ccitt => CRC16_CCITT_BITS,
      Self::Study16 => STUDY16_BITS,
      Self::Crc32 => CRC32_BITS,
    }
  }

  /// Look a preset up by name (case-insensitive, `_` accepted for `-`).
  #[must_use]
  pub fn parse(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|preset| {
      let want = preset.name();
      want.len() == name.len()
        && want.chars().zip(name.chars()).all(|(w, c)| {
          let c = if c == '_' { '-' } else { c.to_ascii_lowercase() };
          w == c
        })
    })
  }

  /// Build the generator.
  ///
  /// # Errors
  ///
  /// Never for the built-in bit strings.
  pub fn generator(self) -> Result<GeneratorPolynomial, CrcError> {
    self.bits().parse()
  }
}

impl fmt::Display for Preset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Resolve a preset name or a literal bit string to a generator.
///
/// # Errors
///
/// Parsing errors of the literal ([`CrcError::InvalidBit`],
/// [`CrcError::InvalidGenerator`]).
pub fn resolve_generator(spec: &str) -> Result<GeneratorPolynomial, CrcError> {
  match Preset::parse(spec) {
    Some(preset) => preset.generator(),
    None => spec.parse(),
  }
}
