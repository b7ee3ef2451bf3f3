// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the HL-MRF
//! kernel — the grounded-inference and weight-learning engine for
//! relational probabilistic models.

pub mod config;
pub mod error;
pub mod outcome;

pub use config::{ConvergenceMetric, LearnConfig, Scheduler, SgdConfig};
pub use error::{KernelError, KernelResult};
pub use outcome::{EpochLog, LearnOutcome, RunOutcome, Termination};
