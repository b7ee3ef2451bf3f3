// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF Kernel Outcome Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Why a reasoner run left the `Running` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Convergence metric fell below tolerance.
    Converged,
    /// Epoch budget exhausted before convergence. A reported outcome,
    /// not an error.
    EpochLimit,
    /// External stop signal observed between epochs. Distinct from
    /// non-convergence.
    Stopped,
}

/// Result of one reasoner run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Aggregate weighted objective at the final state.
    pub final_objective: f32,
    /// Full epochs executed.
    pub epochs_run: usize,
    /// Whether the tolerance was satisfied.
    pub converged: bool,
    /// Exit cause.
    pub termination: Termination,
    /// Value of the shared iteration counter at run end. The counter
    /// persists across runs of one reasoner, so re-runs report cumulative
    /// term visits.
    pub iterations: u64,
}

impl RunOutcome {
    /// True when the run ended by external request rather than by the
    /// optimization itself.
    pub fn stopped(&self) -> bool {
        self.termination == Termination::Stopped
    }
}

/// Per-epoch trace entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpochLog {
    pub epoch: usize,
    /// Aggregate weighted objective after this epoch.
    pub objective: f32,
    /// Aggregate L1 movement of variable values during this epoch.
    pub movement: f32,
    /// Terms whose gradient was applied this epoch.
    pub active_terms: usize,
    /// Iteration counter value after this epoch.
    pub iterations: u64,
}

/// Result of a weight-learning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnOutcome {
    /// Learned per-rule weights, indexed like the rule partition.
    pub weights: Vec<f32>,
    /// Weight-update steps executed.
    pub steps_run: usize,
    /// Objective of the last inner inference run.
    pub final_objective: f32,
}
