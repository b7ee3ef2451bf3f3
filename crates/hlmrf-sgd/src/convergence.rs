// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Convergence Monitor
// ─────────────────────────────────────────────────────────────────────
//! Tracks objective and movement history across epochs and signals
//! termination.
//!
//! Two metrics, selected per run: aggregate L1 movement of all variable
//! values since the previous epoch, or the absolute change of the
//! aggregate weighted objective.

use hlmrf_types::{ConvergenceMetric, EpochLog};

/// Per-run convergence tracker. Holds the full epoch log history and the
/// latest aggregate objective for reporting.
pub struct ConvergenceMonitor {
    metric: ConvergenceMetric,
    tolerance: f32,
    prev_objective: f32,
    prev_values: Vec<f32>,
    logs: Vec<EpochLog>,
}

impl ConvergenceMonitor {
    /// Prime the monitor with the state before the first epoch.
    pub fn new(
        metric: ConvergenceMetric,
        tolerance: f32,
        initial_objective: f32,
        initial_values: &[f32],
    ) -> Self {
        Self {
            metric,
            tolerance,
            prev_objective: initial_objective,
            prev_values: initial_values.to_vec(),
            logs: Vec::new(),
        }
    }

    /// Record one completed epoch; returns true when the tracked quantity
    /// fell below tolerance.
    pub fn observe(
        &mut self,
        epoch: usize,
        objective: f32,
        values: &[f32],
        active_terms: usize,
        iterations: u64,
    ) -> bool {
        let movement: f32 = values
            .iter()
            .zip(self.prev_values.iter())
            .map(|(now, then)| (now - then).abs())
            .sum();
        let objective_delta = (objective - self.prev_objective).abs();

        self.logs.push(EpochLog {
            epoch,
            objective,
            movement,
            active_terms,
            iterations,
        });
        self.prev_objective = objective;
        self.prev_values.copy_from_slice(values);

        match self.metric {
            ConvergenceMetric::Movement => movement < self.tolerance,
            ConvergenceMetric::Objective => objective_delta < self.tolerance,
        }
    }

    /// Latest aggregate weighted objective.
    pub fn objective(&self) -> f32 {
        self.prev_objective
    }

    /// Movement recorded for the most recent epoch.
    pub fn last_movement(&self) -> f32 {
        self.logs.last().map_or(0.0, |log| log.movement)
    }

    pub fn logs(&self) -> &[EpochLog] {
        &self.logs
    }

    pub fn into_logs(self) -> Vec<EpochLog> {
        self.logs
    }
}
