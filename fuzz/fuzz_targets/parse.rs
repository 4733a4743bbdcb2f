//! Parsers must reject bad input with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use polycrc::{Bits, GeneratorPolynomial, resolve_generator};

fuzz_target!(|text: &str| {
  if let Ok(bits) = text.parse::<Bits>() {
    assert_eq!(bits.to_string(), text);
  }
  if let Ok(generator) = text.parse::<GeneratorPolynomial>() {
    assert_eq!(generator.to_string(), text);
    assert_eq!(generator.bits().first(), Some(&true));
  }
  let _ = resolve_generator(text);
});
