use polycrc::{Bits, CrcEngine, CrcError, GeneratorPolynomial, Preset, compute, residue, verify};

const MESSAGE: &str = "Lucas Andrade Souza";

fn gen_bits(len: usize, seed: u64) -> Bits {
  let mut x = seed | 1;
  (0..len)
    .map(|_| {
      x ^= x << 13;
      x ^= x >> 7;
      x ^= x << 17;
      x & 1 == 1
    })
    .collect()
}

fn invert_run(frame: &Bits, position: usize, length: usize) -> Bits {
  let mut out = frame.clone();
  for i in position..position + length {
    out.flip(i).unwrap();
  }
  out
}

#[test]
fn textbook_scenario() {
  let generator: GeneratorPolynomial = "10011".parse().unwrap();
  let payload: Bits = "1101011111".parse().unwrap();

  let crc = compute(&payload, &generator).unwrap();
  assert_eq!(crc.to_string(), "0010");
  assert!(verify(&"11010111110010".parse::<Bits>().unwrap(), &generator).unwrap());
  assert!(!verify(&"11010111111110".parse::<Bits>().unwrap(), &generator).unwrap());
}

#[test]
fn invalid_generators() {
  assert_eq!("0011".parse::<GeneratorPolynomial>(), Err(CrcError::InvalidGenerator));
  assert_eq!(GeneratorPolynomial::new(&[]), Err(CrcError::InvalidGenerator));
}

#[test]
fn frame_too_short() {
  let generator = Preset::Study16.generator().unwrap();
  let frame = Bits::zeros(15);
  assert_eq!(verify(&frame, &generator), Err(CrcError::FrameTooShort { len: 15, degree: 16 }));
  assert_eq!(residue(&frame, &generator), Err(CrcError::FrameTooShort { len: 15, degree: 16 }));
}

#[test]
fn degree16_single_flip_anywhere() {
  let engine = CrcEngine::new(Preset::Study16.generator().unwrap());
  let payload = Bits::from_text(MESSAGE);
  assert_eq!(payload.len() % 8, 0);

  let frame = engine.encode(&payload).unwrap();
  assert!(engine.verify(&frame).unwrap());
  assert_eq!(frame.len() % 8, 0);

  for i in 0..frame.len() {
    let mut corrupted = frame.clone();
    corrupted.flip(i).unwrap();
    assert!(!engine.verify(&corrupted).unwrap(), "flip at {i} escaped");
  }
}

#[test]
fn every_inverted_run_up_to_degree_is_detected() {
  for preset in [Preset::Textbook, Preset::Crc8, Preset::Crc16Ibm, Preset::Study16] {
    let engine = CrcEngine::new(preset.generator().unwrap());
    let frame = engine.encode(&Bits::from_text(MESSAGE)).unwrap();
    let degree = engine.degree();

    for length in 1..=degree {
      for position in 0..=frame.len() - length {
        let corrupted = invert_run(&frame, position, length);
        assert!(
          !engine.verify(&corrupted).unwrap(),
          "{preset}: burst of {length} at {position} escaped"
        );
      }
    }
  }
}

#[test]
fn every_burst_pattern_up_to_degree_is_detected_textbook() {
  // Exhaustive over all burst patterns (end bits set) for r = 4.
  let engine = CrcEngine::new(Preset::Textbook.generator().unwrap());
  let frame = engine.encode(&gen_bits(40, 7)).unwrap();

  for length in 1..=4usize {
    let interior = length.saturating_sub(2);
    for fill in 0..(1u32 << interior) {
      let mut pattern = vec![false; length];
      pattern[0] = true;
      pattern[length - 1] = true;
      for i in 0..interior {
        pattern[i + 1] = (fill >> i) & 1 == 1;
      }
      for position in 0..=frame.len() - length {
        let mut corrupted = frame.clone();
        for (offset, &bit) in pattern.iter().enumerate() {
          if bit {
            corrupted.flip(position + offset).unwrap();
          }
        }
        assert!(!engine.verify(&corrupted).unwrap(), "pattern {pattern:?} at {position} escaped");
      }
    }
  }
}

#[test]
fn escape_depends_only_on_error_pattern() {
  // Undetected iff the error polynomial is a multiple of the generator, so
  // the verdict for a given burst pattern is the same at every offset.
  let engine = CrcEngine::new(Preset::Study16.generator().unwrap());
  let frame = engine.encode(&Bits::from_text(MESSAGE)).unwrap();

  for length in 17..=40 {
    let verdicts: Vec<bool> = (0..=frame.len() - length)
      .map(|position| engine.verify(&invert_run(&frame, position, length)).unwrap())
      .collect();
    let pattern = Bits::from(vec![true; length]);
    let expected = engine.residue(&pattern).unwrap().is_zero();
    assert!(verdicts.iter().all(|&v| v == expected), "length {length}");
  }
}

#[test]
fn roundtrip_over_many_payloads() {
  for preset in Preset::ALL {
    let engine = CrcEngine::new(preset.generator().unwrap());
    for (len, seed) in [(1usize, 1u64), (2, 2), (7, 3), (8, 4), (63, 5), (64, 6), (1000, 7)] {
      let payload = gen_bits(len, seed);
      let crc = engine.compute(&payload).unwrap();
      assert_eq!(crc.len(), engine.degree());
      assert!(engine.verify(&payload.clone().concat(&crc)).unwrap(), "{preset} len={len}");
    }
  }
}
