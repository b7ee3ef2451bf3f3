// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// Quantity the convergence monitor tracks across epochs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceMetric {
    /// Aggregate L1 movement of all variable values since the previous epoch.
    Movement,
    /// Absolute change of the aggregate weighted objective since the
    /// previous epoch.
    Objective,
}

/// Epoch scheduler for the SGD reasoner.
///
/// `Serial` is the reference trajectory. `Hogwild` trades exact
/// reproducibility for throughput: workers update shared variables through
/// lock-free compare-and-swap, so the `dot` read by a concurrently executing
/// term may be stale by a bounded number of steps. The fixed point of the
/// minimization is unaffected. Never enabled implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduler {
    Serial,
    Hogwild { workers: usize },
}

/// Runtime configuration for the SGD reasoner.
///
/// The epoch budget and tolerance are passed to `run` per invocation; this
/// struct carries the knobs that stay fixed across re-runs of one term
/// population (weight learning re-runs the reasoner many times).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgdConfig {
    /// Convergence quantity. Default: Movement.
    pub metric: ConvergenceMetric,

    /// Reshuffle term visitation order every epoch. Avoids systematic bias
    /// from grounding order. Default: true.
    pub shuffle: bool,

    /// Seed for the epoch reshuffle RNG. Default: 42.
    pub seed: u64,

    /// Epoch scheduler. Default: Serial.
    pub scheduler: Scheduler,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            metric: ConvergenceMetric::Movement,
            shuffle: true,
            seed: 42,
            scheduler: Scheduler::Serial,
        }
    }
}

impl SgdConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> KernelResult<()> {
        if let Scheduler::Hogwild { workers } = self.scheduler {
            if workers < 1 {
                return Err(KernelError::Config(format!(
                    "hogwild workers must be >= 1, got {workers}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| KernelError::Config(format!("JSON parse error: {e}")))
    }
}

/// Configuration for the maximum-likelihood weight learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnConfig {
    /// Number of weight-update steps. Default: 25.
    pub steps: usize,

    /// Step size for the weight gradient. Default: 1.0.
    pub step_size: f32,

    /// Epoch budget handed to each inner inference run. Default: 500.
    pub inference_epochs: usize,

    /// Tolerance handed to each inner inference run. Default: 1e-4.
    pub inference_tolerance: f32,
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            steps: 25,
            step_size: 1.0,
            inference_epochs: 500,
            inference_tolerance: 1e-4,
        }
    }
}

impl LearnConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> KernelResult<()> {
        if self.steps < 1 {
            return Err(KernelError::Config(format!(
                "steps must be >= 1, got {}",
                self.steps
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(KernelError::Config(format!(
                "step_size must be finite and > 0, got {}",
                self.step_size
            )));
        }
        if self.inference_epochs < 1 {
            return Err(KernelError::Config(format!(
                "inference_epochs must be >= 1, got {}",
                self.inference_epochs
            )));
        }
        if !(self.inference_tolerance.is_finite() && self.inference_tolerance > 0.0) {
            return Err(KernelError::Config(format!(
                "inference_tolerance must be finite and > 0, got {}",
                self.inference_tolerance
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> KernelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| KernelError::Config(format!("JSON parse error: {e}")))
    }
}
