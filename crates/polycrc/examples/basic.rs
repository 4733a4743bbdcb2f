//! Worked long-division example plus the catalogue generators.
//!
//! Run with: `cargo run --example basic -p polycrc`

use polycrc::{Bits, CrcEngine, GeneratorPolynomial, Preset, RegisterCrc};

fn main() {
  println!("=== polycrc Basic Examples ===\n");

  textbook_example();
  catalogue_examples();
  detection_example();
}

/// The classic `1101011111 / 10011` division.
fn textbook_example() {
  println!("--- Textbook Division ---\n");

  let generator: GeneratorPolynomial = "10011".parse().expect("valid generator");
  let engine = CrcEngine::new(generator);
  let payload: Bits = "1101011111".parse().expect("valid bits");

  let crc = engine.compute(&payload).expect("non-empty payload");
  println!("Payload:   {payload}");
  println!("Generator: {} ({})", engine.generator(), engine.generator().algebraic());
  println!("CRC:       {crc}");
  assert_eq!(crc.to_string(), "0010");

  let frame = payload.concat(&crc);
  println!("Frame:     {frame} -> valid = {}\n", engine.verify(&frame).expect("frame long enough"));
}

/// Remainders of `"123456789"` for each preset, via both formulations.
fn catalogue_examples() {
  println!("--- Catalogue Generators ---\n");

  let data = b"123456789";
  for preset in Preset::ALL {
    let generator = preset.generator().expect("built-in generator");
    let engine = CrcEngine::new(generator.clone());
    let register = RegisterCrc::new(&generator).expect("degree <= 64");

    let by_division = engine.compute(&Bits::from_bytes(data)).expect("non-empty payload");
    let by_register = register.checksum_bytes(data);
    let width = engine.degree().div_ceil(4);
    println!("{:<14} r={:<2}  0x{by_register:0width$X}", preset.name(), engine.degree());
    assert_eq!(by_division.to_u64(), Some(by_register));
  }
  println!();
}

/// A single flipped bit never survives verification.
fn detection_example() {
  println!("--- Error Detection ---\n");

  let engine = CrcEngine::new(Preset::Study16.generator().expect("built-in generator"));
  let frame = engine.encode(&Bits::from_text("Lucas Andrade Souza")).expect("non-empty payload");

  let mut corrupted = frame.clone();
  corrupted.flip(42).expect("index in range");
  println!("Frame bits:      {}", frame.len());
  println!("Original valid:  {}", engine.verify(&frame).expect("frame long enough"));
  println!("Flipped bit 42:  {}", engine.verify(&corrupted).expect("frame long enough"));
}
