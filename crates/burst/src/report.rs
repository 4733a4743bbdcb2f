//! Output formatters for laboratory results.
//!
//! - [`OutputFormat::Summary`]: human-readable report (default)
//! - [`OutputFormat::Tsv`]: one header row plus one row per record
//! - [`OutputFormat::Json`]: pretty-printed JSON of the result struct
//!
//! [`Report`] writes to any [`Write`] destination.

use core::{fmt, str::FromStr};
use std::io::Write;

use serde::Serialize;

use crate::{Comparison, Encoded, Investigation, Result, SearchOutcome, Verdict};

/// Examples printed in a search summary.
const SUMMARY_EXAMPLES: usize = 5;

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
  /// Human-readable summary (default).
  #[default]
  Summary,

  /// Tab-separated values.
  Tsv,

  /// JSON for programmatic use.
  Json,
}

impl OutputFormat {
  /// Parse format from string.
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    match s.to_lowercase().as_str() {
      "summary" | "text" | "human" => Some(Self::Summary),
      "tsv" | "tab" => Some(Self::Tsv),
      "json" => Some(Self::Json),
      _ => None,
    }
  }

  /// Canonical name.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Summary => "summary",
      Self::Tsv => "tsv",
      Self::Json => "json",
    }
  }
}

impl FromStr for OutputFormat {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s).ok_or_else(|| format!("unknown format: {s} (expected summary, tsv or json)"))
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

fn verdict_word(detected: bool) -> &'static str {
  if detected { "DETECTED" } else { "MISSED" }
}

/// Report generator.
#[derive(Debug)]
pub struct Report<W: Write> {
  writer: W,
  format: OutputFormat,
}

impl<W: Write> Report<W> {
  /// Create a new report generator.
  pub fn new(writer: W, format: OutputFormat) -> Self {
    Self { writer, format }
  }

  /// Recover the underlying writer.
  pub fn into_inner(self) -> W {
    self.writer
  }

  fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut self.writer, value)?;
    writeln!(self.writer)?;
    Ok(())
  }

  /// Write an encoded frame.
  pub fn write_encoded(&mut self, encoded: &Encoded) -> Result<()> {
    match self.format {
      OutputFormat::Summary => {
        writeln!(self.writer, "Generator: {}", encoded.generator)?;
        writeln!(self.writer, "Payload:   {}", encoded.payload)?;
        writeln!(self.writer, "CRC:       {}", encoded.crc)?;
        writeln!(self.writer, "Frame:     {}", encoded.frame)?;
      }
      OutputFormat::Tsv => {
        writeln!(self.writer, "generator\tpayload\tcrc\tframe")?;
        writeln!(self.writer, "{}\t{}\t{}\t{}", encoded.generator, encoded.payload, encoded.crc, encoded.frame)?;
      }
      OutputFormat::Json => self.write_json(encoded)?,
    }
    Ok(())
  }

  /// Write a frame check.
  pub fn write_verdict(&mut self, verdict: &Verdict) -> Result<()> {
    match self.format {
      OutputFormat::Summary => {
        writeln!(self.writer, "Generator: {}", verdict.generator)?;
        writeln!(self.writer, "Frame:     {}", verdict.frame)?;
        writeln!(self.writer, "Residue:   {}", verdict.residue)?;
        writeln!(self.writer, "Valid:     {}", verdict.valid)?;
      }
      OutputFormat::Tsv => {
        writeln!(self.writer, "generator\tframe\tresidue\tvalid")?;
        writeln!(self.writer, "{}\t{}\t{}\t{}", verdict.generator, verdict.frame, verdict.residue, verdict.valid)?;
      }
      OutputFormat::Json => self.write_json(verdict)?,
    }
    Ok(())
  }

  /// Write a detection investigation.
  pub fn write_investigation(&mut self, inv: &Investigation) -> Result<()> {
    match self.format {
      OutputFormat::Summary => self.write_investigation_summary(inv),
      OutputFormat::Tsv => self.write_investigation_tsv(inv),
      OutputFormat::Json => self.write_json(inv),
    }
  }

  fn write_investigation_summary(&mut self, inv: &Investigation) -> Result<()> {
    writeln!(self.writer, "CRC Investigation Report")?;
    writeln!(self.writer, "========================")?;
    writeln!(self.writer)?;
    writeln!(self.writer, "Message: {}", inv.message)?;
    writeln!(self.writer, "Generator: {} ({})", inv.generator, inv.polynomial)?;
    writeln!(self.writer, "CRC (r={}): {}", inv.degree, inv.crc)?;
    writeln!(self.writer, "Frame: {} bits", inv.frame_bits)?;
    writeln!(self.writer, "Burst kind: {}", inv.burst_kind)?;
    writeln!(self.writer)?;

    writeln!(self.writer, "Results of {} trials:", inv.summary.trials)?;
    for record in &inv.records {
      write!(
        self.writer,
        "  Trial {}: pos={}, burst={} bits -> engine={}",
        record.trial,
        record.position,
        record.burst_bits,
        verdict_word(record.engine_detected)
      )?;
      match record.reference_detected {
        Some(detected) => writeln!(self.writer, ", reference={}", verdict_word(detected))?,
        None => writeln!(self.writer)?,
      }
    }
    writeln!(self.writer)?;

    let summary = &inv.summary;
    writeln!(self.writer, "Summary:")?;
    writeln!(self.writer, "  Missed (engine): {} / {}", summary.engine_missed, summary.trials)?;
    match summary.reference_missed {
      Some(missed) => writeln!(self.writer, "  Missed (reference): {missed} / {}", summary.trials)?,
      None => writeln!(self.writer, "  Missed (reference): n/a (degree above 64)")?,
    }
    if summary.disagreements > 0 {
      writeln!(self.writer, "  Disagreements: {}", summary.disagreements)?;
    }
    writeln!(self.writer)?;
    writeln!(self.writer, "Note: MISSED means the error was not detected (zero residue).")?;
    Ok(())
  }

  fn write_investigation_tsv(&mut self, inv: &Investigation) -> Result<()> {
    writeln!(self.writer, "trial\tposition\tburst_bits\tengine_detected\treference_detected")?;
    for record in &inv.records {
      let reference = record.reference_detected.map_or_else(|| "-".to_owned(), |d| d.to_string());
      writeln!(
        self.writer,
        "{}\t{}\t{}\t{}\t{reference}",
        record.trial, record.position, record.burst_bits, record.engine_detected
      )?;
    }
    Ok(())
  }

  /// Write an undetected-error search.
  pub fn write_search(&mut self, outcome: &SearchOutcome) -> Result<()> {
    match self.format {
      OutputFormat::Summary => self.write_search_summary(outcome),
      OutputFormat::Tsv => self.write_search_tsv(outcome),
      OutputFormat::Json => self.write_json(outcome),
    }
  }

  fn write_search_summary(&mut self, outcome: &SearchOutcome) -> Result<()> {
    let rule = "=".repeat(60);
    let thin = "-".repeat(60);

    writeln!(self.writer, "UNDETECTED ERROR ANALYSIS")?;
    writeln!(self.writer, "{rule}")?;
    writeln!(self.writer)?;
    writeln!(self.writer, "Configuration:")?;
    writeln!(self.writer, "- Message: {}", outcome.message)?;
    writeln!(self.writer, "- Generator: {} ({})", outcome.generator, outcome.polynomial)?;
    writeln!(self.writer, "- CRC: {}", outcome.crc)?;
    writeln!(self.writer, "- Frame length: {} bits", outcome.frame_bits)?;
    writeln!(self.writer, "- Burst kind: {}", outcome.burst_kind)?;
    writeln!(self.writer, "- Tests run: {}", outcome.total_tests)?;
    writeln!(self.writer, "- Undetected errors: {}", outcome.escapes.len())?;
    writeln!(self.writer)?;

    for entry in outcome.per_length.iter().filter(|t| t.tally.undetected > 0) {
      writeln!(
        self.writer,
        "Burst of {} bits: {} undetected in {} attempts",
        entry.length, entry.tally.undetected, entry.tally.attempts
      )?;
    }
    writeln!(self.writer)?;

    writeln!(self.writer, "UNDETECTED ERROR EXAMPLES:")?;
    writeln!(self.writer, "{thin}")?;
    writeln!(self.writer)?;
    for (i, found) in outcome.escapes.iter().take(SUMMARY_EXAMPLES).enumerate() {
      writeln!(self.writer, "Example {}:", i + 1)?;
      writeln!(self.writer, "  Position: {}", found.position)?;
      writeln!(self.writer, "  Burst length: {} bits", found.length)?;
      writeln!(self.writer, "  Original bits:  {}", found.original)?;
      writeln!(self.writer, "  Corrupted bits: {}", found.corrupted)?;
      writeln!(self.writer, "  Error pattern:  {}", found.pattern)?;
      writeln!(self.writer)?;
    }

    if !outcome.faults.is_empty() {
      writeln!(self.writer, "FAULTS ({} bursts of length <= {} escaped):", outcome.faults.len(), outcome.degree)?;
      for found in &outcome.faults {
        writeln!(self.writer, "  pos={} len={} pattern={}", found.position, found.length, found.pattern)?;
      }
      writeln!(self.writer)?;
    }

    let one_in = if outcome.expected_escape_rate > 0.0 { 1.0 / outcome.expected_escape_rate } else { f64::INFINITY };
    writeln!(self.writer, "ANALYSIS:")?;
    writeln!(self.writer, "{thin}")?;
    writeln!(
      self.writer,
      "1. Bursts longer than {} bits (the generator degree) can escape detection.",
      outcome.degree
    )?;
    writeln!(
      self.writer,
      "2. For bursts longer than r the escape probability is about 2^-{}, roughly 1 in {one_in:.0}.",
      outcome.degree
    )?;
    writeln!(self.writer, "   Observed rate here: {:.6}", outcome.observed_escape_rate())?;
    writeln!(self.writer, "3. An error escapes exactly when its pattern is divisible by the generator.")?;
    Ok(())
  }

  fn write_search_tsv(&mut self, outcome: &SearchOutcome) -> Result<()> {
    writeln!(self.writer, "position\tlength\tpattern\toriginal\tcorrupted")?;
    for found in &outcome.escapes {
      writeln!(
        self.writer,
        "{}\t{}\t{}\t{}\t{}",
        found.position, found.length, found.pattern, found.original, found.corrupted
      )?;
    }
    Ok(())
  }

  /// Write a timing comparison.
  pub fn write_comparison(&mut self, comparison: &Comparison) -> Result<()> {
    match self.format {
      OutputFormat::Summary => {
        writeln!(self.writer, "CRC Timing Comparison")?;
        writeln!(self.writer, "=====================")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Generator: {} (r={})", comparison.generator, comparison.degree)?;
        writeln!(self.writer)?;
        writeln!(
          self.writer,
          "{:>8}  {:>14}  {:>14}  {:>9}  {:>14}  {:>14}  agree",
          "bytes", "division (ms)", "register (ms)", "speedup", "division (B)", "register (B)"
        )?;
        for t in &comparison.timings {
          writeln!(
            self.writer,
            "{:>8}  {:>14.3}  {:>14.3}  {:>8.1}x  {:>14}  {:>14}  {}",
            t.size_bytes,
            t.division_secs * 1e3,
            t.register_secs * 1e3,
            t.speedup(),
            t.division_bytes,
            t.register_bytes,
            if t.agree { "yes" } else { "NO" }
          )?;
        }
      }
      OutputFormat::Tsv => {
        writeln!(self.writer, "size_bytes\tdivision_secs\tregister_secs\tdivision_bytes\tregister_bytes\tagree")?;
        for t in &comparison.timings {
          writeln!(
            self.writer,
            "{}\t{:.9}\t{:.9}\t{}\t{}\t{}",
            t.size_bytes, t.division_secs, t.register_secs, t.division_bytes, t.register_bytes, t.agree
          )?;
        }
      }
      OutputFormat::Json => self.write_json(comparison)?,
    }
    Ok(())
  }
}
