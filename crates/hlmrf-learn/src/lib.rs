// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF Weight Learning
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Maximum-likelihood rule-weight learning for the HL-MRF kernel.
//!
//! An outer loop over the SGD reasoner: each step re-runs inference under
//! the current weights, compares per-rule incompatibility at the inferred
//! state against the labeled truth state, and moves each rule weight
//! along the likelihood gradient.

pub mod learner;

pub use learner::WeightLearner;
