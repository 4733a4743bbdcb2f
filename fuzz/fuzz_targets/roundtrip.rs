//! Encode/verify round trip and burst detection over arbitrary generators.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use polycrc::{Bits, CrcEngine, GeneratorPolynomial};

#[derive(Arbitrary, Debug)]
struct Input {
  /// Generator coefficients below the leading term.
  tail: Vec<bool>,
  payload: Vec<u8>,
  position: usize,
  burst: u8,
}

fuzz_target!(|input: Input| {
  if input.payload.is_empty() || input.tail.len() > 96 {
    return;
  }

  let mut bits = vec![true];
  bits.extend(&input.tail);
  let generator = GeneratorPolynomial::new(&bits).unwrap();
  let engine = CrcEngine::new(generator);

  let frame = engine.encode(&Bits::from_bytes(&input.payload)).unwrap();
  assert_eq!(frame.len(), input.payload.len() * 8 + engine.degree());
  assert!(engine.verify(&frame).unwrap(), "round trip failed for {}", engine.generator());

  // A burst no longer than r is always caught when the constant term is set.
  let degree = engine.degree();
  if !engine.generator().has_constant_term() {
    return;
  }
  let length = 1 + usize::from(input.burst) % degree;
  let position = input.position % (frame.len() - length + 1);
  let mut corrupted = frame.clone();
  corrupted.flip(position).unwrap();
  if length > 1 {
    corrupted.flip(position + length - 1).unwrap();
  }
  assert!(
    !engine.verify(&corrupted).unwrap(),
    "burst of {length} at {position} escaped {}",
    engine.generator()
  );
});
