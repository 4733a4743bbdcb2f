//! Differential fuzzing: long division, shift register and `crc-fast`.

#![no_main]

use crc_fast::CrcAlgorithm;
use libfuzzer_sys::fuzz_target;
use polycrc::{Bits, CrcEngine, GeneratorPolynomial, RegisterCrc};

fuzz_target!(|data: &[u8]| {
  if data.is_empty() {
    return;
  }
  check(data, 0x8141_41AB, 32, CrcAlgorithm::Crc32Aixm);
  check(data, 0x42F0_E1EB_A9EA_3693, 64, CrcAlgorithm::Crc64Ecma182);
});

fn check(data: &[u8], poly: u64, degree: u32, algorithm: CrcAlgorithm) {
  let generator = GeneratorPolynomial::from_normal(poly, degree).unwrap();
  let engine = CrcEngine::new(generator.clone());
  let register = RegisterCrc::new(&generator).unwrap();

  let reference = crc_fast::checksum(algorithm, data);
  let by_register = register.checksum_bytes(data);
  let by_division = engine.compute(&Bits::from_bytes(data)).unwrap().to_u64();

  assert_eq!(
    by_register, reference,
    "register mismatch: ours={by_register:#x}, reference={reference:#x}, len={}",
    data.len()
  );
  assert_eq!(by_division, Some(reference), "division mismatch, len={}", data.len());
}
