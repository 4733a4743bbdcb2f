//! Property tests for the long-division engine.
//!
//! These verify the invariants every frame check must satisfy, for random
//! generators and payloads:
//!
//! 1. **Round trip**: `verify(encode(p))` holds for every valid generator
//! 2. **Single-bit detection**: any one flipped bit is caught
//! 3. **Burst detection**: any burst of length `<= r` is caught
//! 4. **Undetectable-error characterisation**: `verify` misses an error iff
//!    the error vector alone has a zero residue
//! 5. **Cross-check**: the shift-register formulation agrees everywhere
//!
//! Burst and single-bit properties need a generator with both end bits set;
//! the others accept any valid generator.

#![cfg(all(test, not(miri)))]

extern crate std;

use alloc::vec::Vec;

use proptest::prelude::*;

use crate::{Bits, CrcEngine, FrameCheck, GeneratorPolynomial, RegisterCrc};

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Any valid generator of degree `0..=max_degree`.
fn arb_generator(max_degree: usize) -> impl Strategy<Value = GeneratorPolynomial> {
  proptest::collection::vec(any::<bool>(), 0..=max_degree).prop_map(|tail| {
    let mut bits = Vec::with_capacity(tail.len() + 1);
    bits.push(true);
    bits.extend(tail);
    GeneratorPolynomial::new(&bits).unwrap()
  })
}

/// Generator of degree `1..=max_degree` with leading and constant terms set.
fn arb_detecting_generator(max_degree: usize) -> impl Strategy<Value = GeneratorPolynomial> {
  (1..=max_degree)
    .prop_flat_map(|degree| proptest::collection::vec(any::<bool>(), degree - 1))
    .prop_map(|middle| {
      let mut bits = Vec::with_capacity(middle.len() + 2);
      bits.push(true);
      bits.extend(middle);
      bits.push(true);
      GeneratorPolynomial::new(&bits).unwrap()
    })
}

fn arb_payload() -> impl Strategy<Value = Bits> {
  proptest::collection::vec(any::<bool>(), 1..=512).prop_map(Bits::from)
}

/// XOR `pattern` into `frame` starting at `position`.
fn apply(frame: &Bits, position: usize, pattern: &[bool]) -> Bits {
  let mut out = frame.clone();
  for (offset, &bit) in pattern.iter().enumerate() {
    if bit {
      out.flip(position + offset).unwrap();
    }
  }
  out
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn encode_then_verify_holds(generator in arb_generator(40), payload in arb_payload()) {
    let engine = CrcEngine::new(generator);
    let crc = engine.compute(&payload).unwrap();
    prop_assert_eq!(crc.len(), engine.degree());

    let frame = payload.concat(&crc);
    prop_assert!(engine.verify(&frame).unwrap());
  }

  #[test]
  fn compute_is_deterministic(generator in arb_generator(40), payload in arb_payload()) {
    let engine = CrcEngine::new(generator);
    prop_assert_eq!(engine.compute(&payload).unwrap(), engine.compute(&payload).unwrap());
  }

  #[test]
  fn single_flip_is_detected(
    generator in arb_detecting_generator(32),
    payload in arb_payload(),
    index in any::<usize>()
  ) {
    let engine = CrcEngine::new(generator);
    let frame = engine.encode(&payload).unwrap();
    let index = index % frame.len();

    let mut corrupted = frame;
    corrupted.flip(index).unwrap();
    prop_assert!(!engine.verify(&corrupted).unwrap(), "flip at {} escaped", index);
  }

  #[test]
  fn short_burst_is_detected(
    generator in arb_detecting_generator(32),
    payload in arb_payload(),
    length in any::<usize>(),
    position in any::<usize>(),
    interior in proptest::collection::vec(any::<bool>(), 32)
  ) {
    let engine = CrcEngine::new(generator);
    let frame = engine.encode(&payload).unwrap();

    // Burst of length 1..=r: both end bits flipped, interior arbitrary.
    let length = 1 + length % engine.degree();
    let position = position % (frame.len() - length + 1);
    let mut pattern = Bits::zeros(length);
    for (i, bit) in pattern.as_mut_slice().iter_mut().enumerate() {
      *bit = i == 0 || i == length - 1 || interior[i];
    }

    let corrupted = apply(&frame, position, &pattern);
    prop_assert!(!engine.verify(&corrupted).unwrap(),
      "burst of {} bits at {} escaped under {}", length, position, engine.generator());
  }

  #[test]
  fn miss_iff_error_is_a_multiple(
    generator in arb_generator(16),
    payload in arb_payload(),
    error in proptest::collection::vec(any::<bool>(), 0..=528)
  ) {
    let engine = CrcEngine::new(generator);
    let frame = engine.encode(&payload).unwrap();

    // Same length as the frame: truncate or zero-pad.
    let error: Bits = error.into_iter().chain(core::iter::repeat(false)).take(frame.len()).collect();

    let corrupted = apply(&frame, 0, &error);
    let escaped = engine.verify(&corrupted).unwrap();
    prop_assert_eq!(escaped, engine.residue(&error).unwrap().is_zero());
  }

  #[test]
  fn register_agrees_with_division(
    generator in arb_generator(64).prop_filter("degree >= 1", |g| g.degree() >= 1),
    payload in arb_payload(),
    flips in proptest::collection::vec(any::<usize>(), 0..4)
  ) {
    let engine = CrcEngine::new(generator.clone());
    let register = RegisterCrc::new(&generator).unwrap();

    let crc = engine.compute(&payload).unwrap();
    prop_assert_eq!(&crc, &FrameCheck::compute(&register, &payload).unwrap());

    let mut frame = payload.concat(&crc);
    for flip in flips {
      let index = flip % frame.len();
      frame.flip(index).unwrap();
    }
    prop_assert_eq!(engine.verify(&frame).unwrap(), FrameCheck::verify(&register, &frame).unwrap());
  }

  #[test]
  fn bytes_survive_bit_conversion(data in proptest::collection::vec(any::<u8>(), 0..=256)) {
    let bits = Bits::from_bytes(&data);
    prop_assert_eq!(bits.len(), data.len() * 8);
    prop_assert_eq!(bits.to_bytes().unwrap(), data);
  }
}
