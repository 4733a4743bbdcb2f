//! Generator polynomials.
//!
//! A [`GeneratorPolynomial`] of degree `r` is stored as its `r + 1`
//! coefficient bits, highest term first. The leading bit is always set; a
//! value violating that cannot be constructed.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{Bits, CrcError, bits::render};

/// An immutable binary generator polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorPolynomial {
  bits: Vec<bool>,
}

impl GeneratorPolynomial {
  /// Build a generator from its coefficient bits, highest term first.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidGenerator`] if `bits` is empty or `bits[0]` is clear.
  ///
  /// # Example
  ///
  /// ```
  /// use polycrc::GeneratorPolynomial;
  ///
  /// let g = GeneratorPolynomial::new(&[true, false, false, true, true]).unwrap();
  /// assert_eq!(g.degree(), 4);
  /// assert!(GeneratorPolynomial::new(&[false, false, true, true]).is_err());
  /// ```
  pub fn new(bits: &[bool]) -> Result<Self, CrcError> {
    match bits.first() {
      Some(true) => Ok(Self { bits: bits.to_vec() }),
      _ => Err(CrcError::InvalidGenerator),
    }
  }

  /// Build a generator from conventional "normal" notation.
  ///
  /// `poly` holds the coefficients below the implicit leading term, so CRC-16
  /// `0x8005` with `degree = 16` is `x^16 + x^15 + x^2 + 1`. Bits of `poly` at or
  /// above `degree` are ignored.
  ///
  /// # Errors
  ///
  /// [`CrcError::UnsupportedDegree`] unless `1 <= degree <= 64`.
  pub fn from_normal(poly: u64, degree: u32) -> Result<Self, CrcError> {
    if !(1..=64).contains(&degree) {
      return Err(CrcError::UnsupportedDegree { degree: degree as usize });
    }
    let mut bits = Vec::with_capacity(degree as usize + 1);
    bits.push(true);
    bits.extend((0..degree).rev().map(|shift| (poly >> shift) & 1 == 1));
    Ok(Self { bits })
  }

  /// The degree `r`: the number of checksum bits this generator produces.
  #[inline]
  #[must_use]
  pub fn degree(&self) -> usize {
    self.bits.len().saturating_sub(1)
  }

  /// Coefficient bits, highest term first (`degree() + 1` of them).
  #[inline]
  #[must_use]
  pub fn bits(&self) -> &[bool] {
    &self.bits
  }

  /// `true` when the `x^0` coefficient is set.
  ///
  /// Only such generators detect every burst of length `<= degree()`.
  #[inline]
  #[must_use]
  pub fn has_constant_term(&self) -> bool {
    self.degree() > 0 && self.bits.last() == Some(&true)
  }

  /// Normal notation (coefficients below the leading term).
  ///
  /// `None` for degree 0 or degree above 64.
  #[must_use]
  pub fn normal(&self) -> Option<u64> {
    let degree = self.degree();
    if !(1..=64).contains(&degree) {
      return None;
    }
    Some(self.bits.iter().skip(1).fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
  }

  /// Algebraic rendering, e.g. `x^4 + x + 1`.
  #[must_use]
  pub fn algebraic(&self) -> String {
    let degree = self.degree();
    let terms: Vec<String> = self
      .bits
      .iter()
      .enumerate()
      .filter(|&(_, &bit)| bit)
      .map(|(i, _)| match degree - i {
        0 => String::from("1"),
        1 => String::from("x"),
        power => alloc::format!("x^{power}"),
      })
      .collect();
    terms.join(" + ")
  }
}

impl FromStr for GeneratorPolynomial {
  type Err = CrcError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let bits: Bits = s.parse()?;
    Self::new(&bits)
  }
}

impl TryFrom<&[bool]> for GeneratorPolynomial {
  type Error = CrcError;

  #[inline]
  fn try_from(bits: &[bool]) -> Result<Self, Self::Error> {
    Self::new(bits)
  }
}

impl fmt::Display for GeneratorPolynomial {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&render(&self.bits))
  }
}
