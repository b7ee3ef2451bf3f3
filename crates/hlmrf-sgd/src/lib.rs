// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF SGD Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Stochastic subgradient inference engine over grounded hinge-loss
//! potentials.
//!
//! The grounding layer expands weighted first-order rules against
//! relational data into objective terms: continuous potentials
//! `weight * g(coeffs^T x − constant)` over atom truth values in [0, 1].
//! This crate minimizes their weighted sum.
//!
//! Architecture:
//!   - Hyperplane: immutable linear-function descriptor
//!   - ObjectiveTerm: potential family contract + hinge / squared-hinge /
//!     linear variants
//!   - VariableStore: dense index-addressed arena of truth values
//!   - SgdReasoner: epoch driver with diminishing step schedule
//!   - ConvergenceMonitor: movement / objective termination tracking
//!   - Hogwild scheduler: opt-in lock-free parallel relaxation

pub mod convergence;
pub mod hyperplane;
mod parallel;
pub mod reasoner;
pub mod rng;
pub mod store;
pub mod term;

pub use convergence::ConvergenceMonitor;
pub use hyperplane::Hyperplane;
pub use reasoner::{SgdReasoner, StopSignal};
pub use rng::SimpleRng;
pub use store::{clamp_unit, VariableStore};
pub use term::{HingeLossTerm, LinearLossTerm, ObjectiveTerm, SquaredHingeLossTerm};
