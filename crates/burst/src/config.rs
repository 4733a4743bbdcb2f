//! Laboratory configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! a file only needs to name what it changes:
//!
//! ```json
//! { "seed": 42, "search": { "max_length": 24 } }
//! ```
//!
//! Command-line flags are applied on top of whatever was loaded.

use std::{fs, path::Path};

use polycrc::{Bits, GeneratorPolynomial, resolve_generator};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{BurstKind, LabError, Result};

/// Message encoded by default.
pub const DEFAULT_MESSAGE: &str = "Lucas Andrade Souza";

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
  /// Text whose ASCII bits form the payload.
  pub message: String,

  /// Generator for `checksum`, `verify`, `investigate` and `compare`:
  /// a preset name or a bit string.
  pub generator: String,

  /// RNG seed; `None` seeds from the OS.
  pub seed: Option<u64>,

  /// Burst model for injected errors.
  pub burst_kind: BurstKind,

  /// Detection investigation.
  pub investigation: InvestigationConfig,

  /// Undetected-error search.
  pub search: SearchConfig,

  /// Timing comparison.
  pub compare: CompareConfig,
}

impl Default for LabConfig {
  fn default() -> Self {
    Self {
      message: DEFAULT_MESSAGE.to_owned(),
      generator: "crc-16-ibm".to_owned(),
      seed: None,
      burst_kind: BurstKind::Invert,
      investigation: InvestigationConfig::default(),
      search: SearchConfig::default(),
      compare: CompareConfig::default(),
    }
  }
}

/// Parameters of the detection investigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvestigationConfig {
  /// Number of corrupted frames.
  pub trials: usize,
  /// Shortest burst drawn.
  pub burst_min: usize,
  /// Longest burst drawn.
  pub burst_max: usize,
}

impl Default for InvestigationConfig {
  fn default() -> Self {
    Self { trials: 10, burst_min: 2, burst_max: 8 }
  }
}

/// Parameters of the undetected-error search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
  /// Generator searched; a preset name or a bit string.
  pub generator: String,
  /// Shortest burst length tried.
  pub min_length: usize,
  /// Longest burst length tried.
  pub max_length: usize,
  /// Injections per burst length.
  pub attempts_per_length: usize,
  /// Stop once this many escapes have been collected.
  pub limit: usize,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self { generator: "study-16".to_owned(), min_length: 17, max_length: 32, attempts_per_length: 100, limit: 10 }
  }
}

/// Parameters of the timing comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
  /// Payload sizes in bytes.
  pub sizes: Vec<usize>,
}

impl Default for CompareConfig {
  fn default() -> Self {
    Self { sizes: vec![1500, 3000, 6000, 16000] }
  }
}

impl LabConfig {
  /// Parse a JSON document.
  ///
  /// # Errors
  ///
  /// [`LabError::Json`] on malformed input or unknown fields.
  pub fn from_json(text: &str) -> Result<Self> {
    Ok(serde_json::from_str(text)?)
  }

  /// Load a JSON config file.
  ///
  /// # Errors
  ///
  /// [`LabError::Io`] if the file cannot be read, [`LabError::Json`] if it
  /// does not parse.
  pub fn load(path: &Path) -> Result<Self> {
    let text = fs::read_to_string(path)?;
    Self::from_json(&text)
  }

  /// Check ranges, counts and generator names.
  ///
  /// # Errors
  ///
  /// [`LabError::Config`] naming the first offending field.
  pub fn validate(&self) -> Result<()> {
    if self.message.is_empty() {
      return Err(config_error("message must not be empty"));
    }
    resolve_generator(&self.generator).map_err(|e| config_error(format!("generator {:?}: {e}", self.generator)))?;

    let inv = &self.investigation;
    if inv.trials == 0 {
      return Err(config_error("investigation.trials must be at least 1"));
    }
    if inv.burst_min == 0 || inv.burst_min > inv.burst_max {
      return Err(config_error(format!(
        "investigation burst range {}..={} is empty or starts at zero",
        inv.burst_min, inv.burst_max
      )));
    }

    let search = &self.search;
    resolve_generator(&search.generator)
      .map_err(|e| config_error(format!("search.generator {:?}: {e}", search.generator)))?;
    if search.min_length == 0 || search.min_length > search.max_length {
      return Err(config_error(format!(
        "search length range {}..={} is empty or starts at zero",
        search.min_length, search.max_length
      )));
    }
    if search.attempts_per_length == 0 {
      return Err(config_error("search.attempts_per_length must be at least 1"));
    }
    if search.limit == 0 {
      return Err(config_error("search.limit must be at least 1"));
    }

    if self.compare.sizes.is_empty() {
      return Err(config_error("compare.sizes must not be empty"));
    }
    if self.compare.sizes.contains(&0) {
      return Err(config_error("compare.sizes must be positive"));
    }
    Ok(())
  }

  /// Message bits, eight per byte of the UTF-8 text.
  #[must_use]
  pub fn message_bits(&self) -> Bits {
    Bits::from_text(&self.message)
  }

  /// Generator for the single-generator commands.
  ///
  /// # Errors
  ///
  /// Propagates [`polycrc::CrcError`] for an unknown name or invalid bits.
  pub fn generator(&self) -> Result<GeneratorPolynomial> {
    Ok(resolve_generator(&self.generator)?)
  }

  /// Generator for the undetected-error search.
  ///
  /// # Errors
  ///
  /// As [`LabConfig::generator`].
  pub fn search_generator(&self) -> Result<GeneratorPolynomial> {
    Ok(resolve_generator(&self.search.generator)?)
  }

  /// RNG for this run: seeded when `seed` is set, from the OS otherwise.
  #[must_use]
  pub fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    }
  }
}

fn config_error(msg: impl Into<String>) -> LabError {
  LabError::Config(msg.into())
}
