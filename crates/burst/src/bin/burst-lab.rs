//! `burst-lab`: compute and verify CRCs, run burst-detection studies and
//! timing comparisons.
//!
//! Usage:
//!   burst-lab checksum 1101011111 --generator textbook
//!   burst-lab verify 11010111110010 --generator 10011
//!   burst-lab investigate --seed 7
//!   burst-lab search --format json --output search.json
//!   burst-lab compare --sizes 1500,16000
//!
//! Parameters come from `--config <file.json>` when given, then from flags.
//! Logging goes to stderr; `RUST_LOG` overrides the `-v` level.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

use std::{
  fs::File,
  io::{self, BufWriter, Write},
  path::PathBuf,
};

use anyhow::{Context, Result, bail};
use burst::{BurstKind, LabConfig, OutputFormat, Report, compare, frame, investigate, search};
use clap::{ArgAction, Args, Parser, Subcommand};
use polycrc::Bits;
use tracing_subscriber::EnvFilter;

/// Burst-error laboratory for polynomial CRCs.
#[derive(Debug, Parser)]
#[command(name = "burst-lab", version, about)]
struct Cli {
  /// JSON config file; flags override its values.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Output format: summary, tsv or json.
  #[arg(short, long, global = true, default_value = "summary")]
  format: OutputFormat,

  /// Write the report here instead of stdout.
  #[arg(short, long, global = true)]
  output: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace).
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  /// Generator: a preset name (textbook, crc-8, crc-16-ibm, crc-16-ccitt,
  /// study-16, crc-32) or a bit string with a leading 1.
  #[arg(short, long, global = true)]
  generator: Option<String>,

  /// RNG seed for reproducible runs.
  #[arg(long, global = true)]
  seed: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Compute the CRC of a payload and print the frame.
  Checksum {
    /// Payload bits, or text with --text.
    payload: String,

    /// Treat the payload as text (8 bits per byte).
    #[arg(long)]
    text: bool,
  },

  /// Check a received frame.
  Verify {
    /// Frame bits.
    frame: String,
  },

  /// Inject short bursts and compare engine and reference verdicts.
  Investigate {
    #[command(flatten)]
    study: StudyArgs,

    /// Number of trials.
    #[arg(long)]
    trials: Option<usize>,

    /// Shortest burst.
    #[arg(long)]
    burst_min: Option<usize>,

    /// Longest burst.
    #[arg(long)]
    burst_max: Option<usize>,
  },

  /// Search for bursts that escape detection.
  Search {
    #[command(flatten)]
    study: StudyArgs,

    /// Shortest burst length tried.
    #[arg(long)]
    min_length: Option<usize>,

    /// Longest burst length tried.
    #[arg(long)]
    max_length: Option<usize>,

    /// Injections per length.
    #[arg(long)]
    attempts: Option<usize>,

    /// Stop after this many escapes.
    #[arg(long)]
    limit: Option<usize>,
  },

  /// Time long division against the shift register.
  Compare {
    /// Payload sizes in bytes, comma separated.
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,
  },
}

/// Flags shared by the burst studies.
#[derive(Debug, Args)]
struct StudyArgs {
  /// Message to encode.
  #[arg(long)]
  message: Option<String>,

  /// Burst model: invert or random.
  #[arg(long)]
  kind: Option<BurstKind>,
}

impl StudyArgs {
  fn apply(&self, config: &mut LabConfig) {
    if let Some(message) = &self.message {
      config.message.clone_from(message);
    }
    if let Some(kind) = self.kind {
      config.burst_kind = kind;
    }
  }
}

fn init_tracing(verbose: u8) {
  let fallback = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_config(cli: &Cli) -> Result<LabConfig> {
  let mut config = match &cli.config {
    Some(path) => LabConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
    None => LabConfig::default(),
  };
  apply_overrides(&mut config, cli);
  Ok(config)
}

/// Fold command-line flags into `config`. A flag always wins over the file.
///
/// `--generator` names the searched generator for `search` and the single
/// generator for every other command.
fn apply_overrides(config: &mut LabConfig, cli: &Cli) {
  if cli.seed.is_some() {
    config.seed = cli.seed;
  }
  if let Some(generator) = &cli.generator {
    match cli.command {
      Command::Search { .. } => config.search.generator.clone_from(generator),
      _ => config.generator.clone_from(generator),
    }
  }

  match &cli.command {
    Command::Checksum { .. } | Command::Verify { .. } => {}
    Command::Investigate { study, trials, burst_min, burst_max } => {
      study.apply(config);
      let inv = &mut config.investigation;
      inv.trials = trials.unwrap_or(inv.trials);
      inv.burst_min = burst_min.unwrap_or(inv.burst_min);
      inv.burst_max = burst_max.unwrap_or(inv.burst_max);
    }
    Command::Search { study, min_length, max_length, attempts, limit } => {
      study.apply(config);
      let params = &mut config.search;
      params.min_length = min_length.unwrap_or(params.min_length);
      params.max_length = max_length.unwrap_or(params.max_length);
      params.attempts_per_length = attempts.unwrap_or(params.attempts_per_length);
      params.limit = limit.unwrap_or(params.limit);
    }
    Command::Compare { sizes } => {
      if let Some(sizes) = sizes {
        config.compare.sizes.clone_from(sizes);
      }
    }
  }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
  Ok(match path {
    Some(path) => {
      let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
      Box::new(BufWriter::new(file))
    }
    None => Box::new(io::stdout().lock()),
  })
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = load_config(&cli)?;
  let mut report = Report::new(open_output(cli.output.as_ref())?, cli.format);

  match &cli.command {
    Command::Checksum { payload, text } => {
      let generator = config.generator()?;
      let payload = if *text {
        Bits::from_text(payload)
      } else {
        payload.parse::<Bits>().context("parsing payload bits")?
      };
      report.write_encoded(&frame::encode(&generator, &payload)?)?;
    }
    Command::Verify { frame: bits } => {
      let generator = config.generator()?;
      let bits: Bits = bits.parse().context("parsing frame bits")?;
      let verdict = frame::check(&generator, &bits)?;
      report.write_verdict(&verdict)?;
      if !verdict.valid {
        tracing::info!(residue = %verdict.residue, "frame rejected");
      }
    }
    Command::Investigate { .. } => {
      config.validate()?;
      let result = investigate(&config, &mut config.rng())?;
      report.write_investigation(&result)?;
      if result.summary.disagreements > 0 {
        bail!("engine and reference disagreed on {} trials", result.summary.disagreements);
      }
    }
    Command::Search { .. } => {
      config.validate()?;
      let outcome = search(&config, &mut config.rng())?;
      report.write_search(&outcome)?;
      if !outcome.faults.is_empty() {
        bail!("{} bursts no longer than the generator degree escaped", outcome.faults.len());
      }
    }
    Command::Compare { .. } => {
      config.validate()?;
      let comparison = compare(&config.generator()?, &config.compare.sizes, &mut config.rng())?;
      report.write_comparison(&comparison)?;
      if comparison.timings.iter().any(|t| !t.agree) {
        bail!("long division and shift register produced different remainders");
      }
    }
  }

  report.into_inner().flush().context("flushing report")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const FILE: &str = r#"{
    "seed": 11,
    "generator": "crc-8",
    "burst_kind": "random",
    "investigation": { "trials": 40 },
    "search": { "generator": "textbook", "limit": 3 },
    "compare": { "sizes": [64] }
  }"#;

  fn configured(args: &[&str]) -> LabConfig {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut config = LabConfig::from_json(FILE).unwrap();
    apply_overrides(&mut config, &cli);
    config
  }

  #[test]
  fn file_values_survive_without_flags() {
    let config = configured(&["burst-lab", "investigate"]);
    assert_eq!(config, LabConfig::from_json(FILE).unwrap());
  }

  #[test]
  fn seed_flag_beats_file() {
    assert_eq!(configured(&["burst-lab", "--seed", "5", "compare"]).seed, Some(5));
    assert_eq!(configured(&["burst-lab", "compare"]).seed, Some(11));
  }

  #[test]
  fn generator_flag_targets_search_generator_for_search() {
    let config = configured(&["burst-lab", "search", "--generator", "crc-32"]);
    assert_eq!(config.search.generator, "crc-32");
    assert_eq!(config.generator, "crc-8");
  }

  #[test]
  fn generator_flag_targets_generator_elsewhere() {
    for command in ["investigate", "compare"] {
      let config = configured(&["burst-lab", "-g", "study-16", command]);
      assert_eq!(config.generator, "study-16", "{command}");
      assert_eq!(config.search.generator, "textbook", "{command}");
    }
    let config = configured(&["burst-lab", "checksum", "1101011111", "-g", "10011"]);
    assert_eq!(config.generator().unwrap().to_string(), "10011");
  }

  #[test]
  fn section_flags_override_only_their_fields() {
    let config = configured(&["burst-lab", "investigate", "--burst-max", "12", "--message", "hi", "--kind", "invert"]);
    assert_eq!(config.investigation.trials, 40);
    assert_eq!(config.investigation.burst_max, 12);
    assert_eq!(config.message, "hi");
    assert_eq!(config.burst_kind, BurstKind::Invert);

    let config = configured(&["burst-lab", "search", "--min-length", "5", "--limit", "7"]);
    assert_eq!(config.search.min_length, 5);
    assert_eq!(config.search.limit, 7);
    assert_eq!(config.search.max_length, 32);
    assert_eq!(config.burst_kind, BurstKind::Random);

    let config = configured(&["burst-lab", "compare", "--sizes", "8,16"]);
    assert_eq!(config.compare.sizes, [8, 16]);
  }

  #[test]
  fn checksum_flags_leave_studies_alone() {
    let config = configured(&["burst-lab", "verify", "11010111110010"]);
    assert_eq!(config.investigation.trials, 40);
    assert_eq!(config.search.limit, 3);
    assert_eq!(config.compare.sizes, [64]);
  }
}
