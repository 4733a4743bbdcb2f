//! Owned bit sequences.
//!
//! A [`Bits`] value is an ordered sequence of binary digits read as a GF(2)
//! polynomial, first element = most significant term. It dereferences to
//! `[bool]`, so every operation in this crate takes a plain `&[bool]` view and
//! callers may pass either.
//!
//! Byte-oriented input is unpacked most-significant bit first:
//!
//! ```
//! use polycrc::Bits;
//!
//! let bits = Bits::from_bytes(b"A");
//! assert_eq!(bits.to_string(), "01000001");
//! assert_eq!(bits.to_bytes().unwrap(), b"A");
//! ```

use alloc::{string::String, vec, vec::Vec};
use core::{fmt, ops::Deref, str::FromStr};

use crate::CrcError;

/// An owned, ordered sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bits(Vec<bool>);

impl Bits {
  /// Create an empty sequence.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  /// Create a sequence of `len` zero bits.
  #[inline]
  #[must_use]
  pub fn zeros(len: usize) -> Self {
    Self(vec![false; len])
  }

  /// Unpack bytes, 8 bits per byte, most-significant bit first.
  #[must_use]
  pub fn from_bytes(bytes: &[u8]) -> Self {
    bytes
      .iter()
      .flat_map(|&byte| (0..8u32).rev().map(move |shift| (byte >> shift) & 1 == 1))
      .collect()
  }

  /// Unpack the UTF-8 encoding of `text`.
  #[inline]
  #[must_use]
  pub fn from_text(text: &str) -> Self {
    Self::from_bytes(text.as_bytes())
  }

  /// Take the low `width` bits of `value`, most-significant first.
  ///
  /// Positions above bit 63 are zero.
  #[must_use]
  pub fn from_u64(value: u64, width: usize) -> Self {
    (0..width).rev().map(|shift| shift < 64 && (value >> shift) & 1 == 1).collect()
  }

  /// Pack into bytes, most-significant bit first.
  ///
  /// # Errors
  ///
  /// [`CrcError::NotByteAligned`] unless the length is a multiple of 8.
  pub fn to_bytes(&self) -> Result<Vec<u8>, CrcError> {
    if self.0.len() % 8 != 0 {
      return Err(CrcError::NotByteAligned { len: self.0.len() });
    }
    Ok(
      self
        .0
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect(),
    )
  }

  /// Read the sequence as an unsigned integer, `None` past 64 bits.
  #[must_use]
  pub fn to_u64(&self) -> Option<u64> {
    if self.0.len() > 64 {
      return None;
    }
    Some(self.0.iter().fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
  }

  /// Append `tail`, returning the extended sequence.
  #[must_use]
  pub fn concat(mut self, tail: &[bool]) -> Self {
    self.0.extend_from_slice(tail);
    self
  }

  /// Append one bit.
  #[inline]
  pub fn push(&mut self, bit: bool) {
    self.0.push(bit);
  }

  /// Invert the bit at `index`.
  ///
  /// # Errors
  ///
  /// [`CrcError::BitIndexOutOfRange`] if `index >= len`.
  pub fn flip(&mut self, index: usize) -> Result<(), CrcError> {
    let len = self.0.len();
    let bit = self.0.get_mut(index).ok_or(CrcError::BitIndexOutOfRange { index, len })?;
    *bit = !*bit;
    Ok(())
  }

  /// `true` when no bit is set (including the empty sequence).
  #[inline]
  #[must_use]
  pub fn is_zero(&self) -> bool {
    is_zero(&self.0)
  }

  /// Borrow as a slice.
  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[bool] {
    &self.0
  }

  /// Mutably borrow as a slice.
  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [bool] {
    &mut self.0
  }

  /// Unwrap into the underlying vector.
  #[inline]
  #[must_use]
  pub fn into_inner(self) -> Vec<bool> {
    self.0
  }
}

#[inline]
pub(crate) fn is_zero(bits: &[bool]) -> bool {
  bits.iter().all(|&bit| !bit)
}

impl Deref for Bits {
  type Target = [bool];

  #[inline]
  fn deref(&self) -> &[bool] {
    &self.0
  }
}

impl AsRef<[bool]> for Bits {
  #[inline]
  fn as_ref(&self) -> &[bool] {
    &self.0
  }
}

impl From<Vec<bool>> for Bits {
  #[inline]
  fn from(bits: Vec<bool>) -> Self {
    Self(bits)
  }
}

impl From<&[bool]> for Bits {
  #[inline]
  fn from(bits: &[bool]) -> Self {
    Self(bits.to_vec())
  }
}

impl From<Bits> for Vec<bool> {
  #[inline]
  fn from(bits: Bits) -> Self {
    bits.0
  }
}

impl FromIterator<bool> for Bits {
  fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl Extend<bool> for Bits {
  fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
    self.0.extend(iter);
  }
}

impl FromStr for Bits {
  type Err = CrcError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.chars()
      .enumerate()
      .map(|(index, found)| match found {
        '0' => Ok(false),
        '1' => Ok(true),
        _ => Err(CrcError::InvalidBit { index, found }),
      })
      .collect()
  }
}

impl fmt::Display for Bits {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&render(&self.0))
  }
}

/// Render a bit slice as a `0`/`1` string.
#[must_use]
pub fn render(bits: &[bool]) -> String {
  bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
  use alloc::string::ToString;

  use super::*;

  #[test]
  fn parse_and_display() {
    let bits: Bits = "1101011111".parse().unwrap();
    assert_eq!(bits.len(), 10);
    assert!(bits[0] && bits[1] && !bits[2]);
    assert_eq!(bits.to_string(), "1101011111");
  }

  #[test]
  fn parse_empty() {
    let bits: Bits = "".parse().unwrap();
    assert!(bits.is_empty());
    assert!(bits.is_zero());
  }

  #[test]
  fn parse_rejects_other_characters() {
    assert_eq!("10 1".parse::<Bits>(), Err(CrcError::InvalidBit { index: 2, found: ' ' }));
    assert_eq!("1_0".parse::<Bits>(), Err(CrcError::InvalidBit { index: 1, found: '_' }));
    assert_eq!("2".parse::<Bits>(), Err(CrcError::InvalidBit { index: 0, found: '2' }));
  }

  #[test]
  fn bytes_are_msb_first() {
    assert_eq!(Bits::from_bytes(&[0x80, 0x01]).to_string(), "1000000000000001");
    assert_eq!(Bits::from_text("Lu").to_string(), "0100110001110101");
  }

  #[test]
  fn to_bytes_inverts_from_bytes() {
    let data = b"Lucas Andrade Souza";
    assert_eq!(Bits::from_bytes(data).to_bytes().unwrap(), data);
  }

  #[test]
  fn to_bytes_requires_alignment() {
    let bits: Bits = "1010101".parse().unwrap();
    assert_eq!(bits.to_bytes(), Err(CrcError::NotByteAligned { len: 7 }));
  }

  #[test]
  fn flip_in_and_out_of_range() {
    let mut bits = Bits::zeros(4);
    bits.flip(3).unwrap();
    assert_eq!(bits.to_string(), "0001");
    assert_eq!(bits.flip(4), Err(CrcError::BitIndexOutOfRange { index: 4, len: 4 }));
  }

  #[test]
  fn u64_conversions() {
    let bits = Bits::from_u64(0b0010, 4);
    assert_eq!(bits.to_string(), "0010");
    assert_eq!(bits.to_u64(), Some(2));
    assert_eq!(Bits::from_u64(u64::MAX, 66).to_string().find('1'), Some(2));
    assert_eq!(Bits::zeros(65).to_u64(), None);
  }

  #[test]
  fn concat_appends() {
    let payload: Bits = "1101".parse().unwrap();
    let frame = payload.concat(&[false, true]);
    assert_eq!(frame.to_string(), "110101");
  }
}
