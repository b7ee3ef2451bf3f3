// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — SGD Reasoner (Epoch Driver)
// ─────────────────────────────────────────────────────────────────────
//! Stochastic subgradient driver minimizing the weighted sum of all
//! objective terms over the variable store.
//!
//! One epoch visits every term exactly once. Per visit: advance the shared
//! 1-based iteration counter, compute `dot`, and when the term is active
//! apply `value − gradient` with a clamp-write to every referenced
//! variable. The convergence monitor and the external stop signal are
//! consulted between epochs, never mid-epoch.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use hlmrf_types::{
    EpochLog, KernelError, KernelResult, RunOutcome, Scheduler, SgdConfig, Termination,
};

use crate::convergence::ConvergenceMonitor;
use crate::parallel::{hogwild_epoch, AtomicValues};
use crate::rng::SimpleRng;
use crate::store::VariableStore;
use crate::term::ObjectiveTerm;

/// Cloneable cancellation handle for a running reasoner.
///
/// `stop()` requests termination; the driver honors it at the next epoch
/// boundary, leaving the variable store in a valid (if not converged)
/// state. The signal persists until `reactivate()`.
#[derive(Clone)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reactivate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Aggregate weighted objective over a raw value slice.
fn objective_over(terms: &[Box<dyn ObjectiveTerm>], values: &[f32]) -> f32 {
    terms
        .iter()
        .map(|term| term.potential(term.hyperplane().dot(values)))
        .sum()
}

/// SGD epoch driver. Owns the term collection and the visit order; the
/// variable store is passed into `run` by reference and stays owned by the
/// caller, consistent with stores being shared across reasoning runs in
/// weight learning.
pub struct SgdReasoner {
    config: SgdConfig,
    terms: Vec<Box<dyn ObjectiveTerm>>,
    order: Vec<usize>,
    rng: SimpleRng,
    stop: StopSignal,
    /// Shared 1-based iteration counter driving the diminishing step
    /// schedule. Persists across runs: a re-run continues the schedule
    /// instead of restarting at full strength, so a converged store stays
    /// within tolerance even where terms remain active at the fixed point.
    iteration: u64,
    /// Per-epoch trace of the most recent run.
    pub log: Vec<EpochLog>,
}

impl SgdReasoner {
    pub fn new(terms: Vec<Box<dyn ObjectiveTerm>>, config: SgdConfig) -> KernelResult<Self> {
        config.validate()?;
        let order: Vec<usize> = (0..terms.len()).collect();
        let rng = SimpleRng::new(config.seed);
        Ok(Self {
            config,
            terms,
            order,
            rng,
            stop: StopSignal::new(),
            iteration: 0,
            log: Vec::new(),
        })
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[Box<dyn ObjectiveTerm>] {
        &self.terms
    }

    /// Weight-learning contract: weights are externally settable between
    /// runs with the same term collection.
    pub fn set_weight(&mut self, index: usize, weight: f32) -> KernelResult<()> {
        let term = self.terms.get_mut(index).ok_or_else(|| {
            KernelError::Validation(format!("term index {index} out of range"))
        })?;
        term.set_weight(weight)
    }

    /// Iteration counter value: term visits since construction or the last
    /// `reset_schedule`.
    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    /// Restart the diminishing step schedule at full strength.
    ///
    /// Re-runs normally continue the schedule; reset only when reusing the
    /// term collection on a genuinely new problem, since a full-strength
    /// step at an interior fixed point bounces the store out of tolerance.
    pub fn reset_schedule(&mut self) {
        self.iteration = 0;
    }

    /// Handle for cross-thread cancellation.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn reactivate(&self) {
        self.stop.reactivate();
    }

    /// Aggregate weighted objective at the store's current state.
    pub fn objective(&self, store: &VariableStore) -> f32 {
        objective_over(&self.terms, store.values())
    }

    /// Ground-rule satisfaction (1 − incompatibility, clamped) per term,
    /// in term order.
    pub fn satisfactions(&self, store: &VariableStore) -> Vec<f32> {
        self.terms
            .iter()
            .map(|term| term.satisfaction(term.hyperplane().dot(store.values())))
            .collect()
    }

    /// Every referenced index must fall inside the store. A violation is a
    /// defect in the grounding layer and fatal before any step is taken.
    fn validate_bindings(&self, store: &VariableStore) -> KernelResult<()> {
        for (t, term) in self.terms.iter().enumerate() {
            let max_index = term.hyperplane().max_index();
            if max_index >= store.len() {
                return Err(KernelError::Grounding(format!(
                    "term {t} references variable {max_index} but the store holds {}",
                    store.len()
                )));
            }
        }
        Ok(())
    }

    /// Minimize the weighted objective.
    ///
    /// Runs until the convergence monitor signals, the epoch budget is
    /// exhausted, or the stop signal is observed. Hitting the budget is a
    /// reported outcome, not an error.
    ///
    /// The iteration counter persists across runs, so a re-run continues
    /// the diminishing schedule: on an already-converged store the first
    /// epoch moves less than the prior run's final epoch and convergence is
    /// detected after one epoch, whether the fixed point sits on a gating
    /// boundary or keeps its terms active. `reset_schedule` restores the
    /// full-strength schedule for a fresh problem.
    pub fn run(
        &mut self,
        store: &mut VariableStore,
        max_epochs: usize,
        tolerance: f32,
    ) -> KernelResult<RunOutcome> {
        if max_epochs < 1 {
            return Err(KernelError::Config(format!(
                "max_epochs must be >= 1, got {max_epochs}"
            )));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(KernelError::Config(format!(
                "tolerance must be finite and > 0, got {tolerance}"
            )));
        }
        self.validate_bindings(store)?;
        self.log.clear();

        if self.terms.is_empty() {
            return Ok(RunOutcome {
                final_objective: 0.0,
                epochs_run: 0,
                converged: true,
                termination: Termination::Converged,
                iterations: self.iteration,
            });
        }

        let workers = match self.config.scheduler {
            Scheduler::Serial => 0,
            Scheduler::Hogwild { workers } => workers,
        };
        let shared = if workers > 0 {
            Some((
                AtomicValues::from_values(store.values()),
                AtomicU64::new(self.iteration),
            ))
        } else {
            None
        };

        let initial_objective = objective_over(&self.terms, store.values());
        if !initial_objective.is_finite() {
            return Err(KernelError::Numerical(format!(
                "non-finite initial objective: {initial_objective}"
            )));
        }

        let mut monitor = ConvergenceMonitor::new(
            self.config.metric,
            tolerance,
            initial_objective,
            store.values(),
        );
        let mut iteration = self.iteration;
        let mut epochs_run = 0;
        let mut converged = false;
        let mut termination = Termination::EpochLimit;

        for epoch in 1..=max_epochs {
            if self.stop.is_stopped() {
                termination = Termination::Stopped;
                log::warn!("stop signal observed before epoch {epoch}; halting run");
                break;
            }

            if self.config.shuffle {
                self.rng.shuffle(&mut self.order);
            }

            let active_terms = match &shared {
                None => self.serial_epoch(store, &mut iteration)?,
                Some((values, counter)) => {
                    let active =
                        hogwild_epoch(&self.terms, &self.order, workers, values, counter)?;
                    store.copy_from(&values.snapshot());
                    iteration = counter.load(Ordering::Relaxed);
                    active
                }
            };
            self.iteration = iteration;
            epochs_run = epoch;

            let objective = objective_over(&self.terms, store.values());
            if !objective.is_finite() {
                return Err(KernelError::Numerical(format!(
                    "non-finite objective after epoch {epoch}: {objective}"
                )));
            }

            let done = monitor.observe(epoch, objective, store.values(), active_terms, iteration);
            log::debug!(
                "epoch {epoch}: objective={objective:.6} movement={:.6} active={active_terms}",
                monitor.last_movement()
            );
            if done {
                converged = true;
                termination = Termination::Converged;
                break;
            }
        }

        let final_objective = monitor.objective();
        self.log = monitor.into_logs();
        log::info!(
            "run finished: {termination:?} after {epochs_run} epochs, objective={final_objective:.6}"
        );

        Ok(RunOutcome {
            final_objective,
            epochs_run,
            converged,
            termination,
            iterations: iteration,
        })
    }

    /// One synchronous pass over every term in the current visit order.
    fn serial_epoch(
        &self,
        store: &mut VariableStore,
        iteration: &mut u64,
    ) -> KernelResult<usize> {
        let mut active_terms = 0;
        for &t in &self.order {
            let term = &self.terms[t];
            // Pre-increment: the first visited term divides by 1, never 0.
            *iteration += 1;
            let hyperplane = term.hyperplane();
            let dot = hyperplane.dot(store.values());
            if !term.is_active(dot) {
                continue;
            }
            active_terms += 1;
            for position in 0..hyperplane.len() {
                let step = term.gradient(*iteration, position, dot);
                if !step.is_finite() {
                    return Err(KernelError::Numerical(format!(
                        "non-finite gradient from term {t} at iteration {iteration}"
                    )));
                }
                let index = hyperplane.index(position);
                store.set_clamped(index, store.value(index) - step);
            }
        }
        Ok(active_terms)
    }
}
