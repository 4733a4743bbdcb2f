//! Differential tests against the `crc-fast` library.
//!
//! Zero-init, non-reflected catalogue entries are exactly the remainder of
//! long division, so the library output must match both formulations here.

use crc_fast::CrcAlgorithm;
use polycrc::{Bits, CrcEngine, GeneratorPolynomial, RegisterCrc};
use proptest::prelude::*;

const CHECK_INPUT: &[u8] = b"123456789";

fn pair(poly: u64, degree: u32) -> (CrcEngine, RegisterCrc) {
  let generator = GeneratorPolynomial::from_normal(poly, degree).unwrap();
  (CrcEngine::new(generator.clone()), RegisterCrc::new(&generator).unwrap())
}

fn crc32_aixm() -> (CrcEngine, RegisterCrc) {
  pair(0x8141_41AB, 32)
}

fn crc64_ecma() -> (CrcEngine, RegisterCrc) {
  pair(0x42F0_E1EB_A9EA_3693, 64)
}

#[test]
fn check_values_match_library() {
  let (engine, register) = crc32_aixm();
  let expected = crc_fast::checksum(CrcAlgorithm::Crc32Aixm, CHECK_INPUT);
  assert_eq!(expected, 0x3010_BF7F);
  assert_eq!(register.checksum_bytes(CHECK_INPUT), expected);
  assert_eq!(engine.compute(&Bits::from_bytes(CHECK_INPUT)).unwrap().to_u64(), Some(expected));

  let (engine, register) = crc64_ecma();
  let expected = crc_fast::checksum(CrcAlgorithm::Crc64Ecma182, CHECK_INPUT);
  assert_eq!(expected, 0x6C40_DF5F_0B49_7347);
  assert_eq!(register.checksum_bytes(CHECK_INPUT), expected);
  assert_eq!(engine.compute(&Bits::from_bytes(CHECK_INPUT)).unwrap().to_u64(), Some(expected));
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(128))]

  #[test]
  fn crc32_aixm_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 1..=512)) {
    let (engine, register) = crc32_aixm();
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Aixm, &data);

    prop_assert_eq!(register.checksum_bytes(&data), reference);
    prop_assert_eq!(engine.compute(&Bits::from_bytes(&data)).unwrap().to_u64(), Some(reference));
  }

  #[test]
  fn crc64_ecma_matches_crc_fast(data in proptest::collection::vec(any::<u8>(), 1..=512)) {
    let (engine, register) = crc64_ecma();
    let reference = crc_fast::checksum(CrcAlgorithm::Crc64Ecma182, &data);

    prop_assert_eq!(register.checksum_bytes(&data), reference);
    prop_assert_eq!(engine.compute(&Bits::from_bytes(&data)).unwrap().to_u64(), Some(reference));
  }

  #[test]
  fn library_residue_of_frame_is_zero(data in proptest::collection::vec(any::<u8>(), 1..=256)) {
    // Appending the big-endian checksum yields a frame whose CRC is zero.
    let reference = crc_fast::checksum(CrcAlgorithm::Crc32Aixm, &data);
    let mut frame = data.clone();
    frame.extend_from_slice(&(reference as u32).to_be_bytes());
    prop_assert_eq!(crc_fast::checksum(CrcAlgorithm::Crc32Aixm, &frame), 0);

    let (engine, _) = crc32_aixm();
    prop_assert!(engine.verify(&Bits::from_bytes(&frame)).unwrap());
  }
}
