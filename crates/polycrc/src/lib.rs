//! Cyclic redundancy checks over arbitrary binary generator polynomials.
//!
//! This crate computes and verifies CRCs by explicit polynomial long division
//! over GF(2). Generators of any degree are supported; there are no lookup
//! tables and no hardware paths. The point is the division itself and the
//! detection guarantees that follow from it.
//!
//! # Components
//!
//! | Type | Role |
//! |------|------|
//! | [`Bits`] | Owned bit sequence, MSB = first element |
//! | [`GeneratorPolynomial`] | Validated divisor of degree `r` (leading bit set) |
//! | [`CrcEngine`] | `compute` / `verify` by long division |
//! | [`RegisterCrc`] | Independent shift-register formulation (`r <= 64`) |
//! | [`FrameCheck`] | Trait both implementations satisfy |
//! | [`Preset`] | Named generators |
//!
//! # Example
//!
//! ```rust
//! use polycrc::{Bits, CrcEngine, Preset};
//!
//! let engine = CrcEngine::new(Preset::Crc16Ibm.generator().unwrap());
//! let frame = engine.encode(&Bits::from_text("hello")).unwrap();
//! assert!(engine.verify(&frame).unwrap());
//!
//! let mut corrupted = frame.clone();
//! corrupted.flip(3).unwrap();
//! assert!(!engine.verify(&corrupted).unwrap());
//! ```
//!
//! # Detection guarantees
//!
//! `verify` misses an error exactly when the error polynomial (the XOR of the
//! sent and received frames) is a multiple of the generator. For a generator
//! of degree `r >= 1` with its constant term set:
//!
//! - every single-bit error is detected
//! - every burst of length `<= r` is detected
//! - longer bursts escape with probability about `2^-r`
//!
//! # no_std Support
//!
//! The crate is `no_std` and needs `alloc`. The default `std` feature only
//! adds `std::error::Error` plumbing through `thiserror`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bits;
pub mod catalog;
mod check;
mod engine;
mod error;
mod generator;
mod register;

#[cfg(test)]
mod proptests;

pub use bits::{Bits, render};
pub use catalog::{Preset, resolve_generator};
pub use check::FrameCheck;
pub use engine::{CrcEngine, compute, residue, verify};
pub use error::CrcError;
pub use generator::GeneratorPolynomial;
pub use register::RegisterCrc;
