//! Burst-error laboratory for [`polycrc`].
//!
//! This crate drives the CRC engine the way a detection study would:
//! corrupt encoded frames with burst errors, check which corruptions slip
//! through, and compare the long-division engine against the shift-register
//! formulation.
//!
//! # Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`inject`] | Burst models and error patterns |
//! | [`trial`] | Short-burst detection investigation, engine vs reference |
//! | [`search`] | Hunt for long bursts that escape detection |
//! | [`compare`] | Wall-clock timing of both formulations |
//! | [`stats`] | Tallies and the `2^-r` estimate |
//! | [`report`] | Summary / TSV / JSON output |
//! | [`config`] | JSON-loadable run parameters |
//!
//! The `burst-lab` binary exposes all of it on the command line.
//!
//! # Logging
//!
//! Runs emit `tracing` events: `info` for run summaries, `debug` per trial,
//! `warn` for each escape, `error` for engine faults and disagreements.
//! Installing a subscriber is left to the caller.

pub mod compare;
pub mod config;
mod error;
pub mod frame;
pub mod inject;
pub mod report;
pub mod search;
pub mod stats;
pub mod trial;

pub use compare::{Comparison, Timing, compare};
pub use config::{CompareConfig, DEFAULT_MESSAGE, InvestigationConfig, LabConfig, SearchConfig};
pub use error::{LabError, Result};
pub use frame::{Encoded, Verdict};
pub use inject::{Burst, BurstKind, error_pattern, inject_burst, window};
pub use report::{OutputFormat, Report};
pub use search::{LengthTally, SearchOutcome, UndetectedError, search, search_frame};
pub use stats::{DetectionTally, TrialSummary, expected_escape_rate};
pub use trial::{Investigation, TrialRecord, investigate, run_trials};
