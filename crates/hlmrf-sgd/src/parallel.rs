// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Hogwild Epoch Scheduler
// ─────────────────────────────────────────────────────────────────────
//! Lock-free parallel epoch execution over a shared variable arena.
//!
//! Term indices are partitioned across scoped worker threads. Updates go
//! through a compare-exchange loop on f32 bit patterns, so the `dot` read
//! by a concurrently executing term can be stale by a bounded number of
//! steps. The fixed point of the minimization is unaffected under the
//! diminishing step schedule; the exact trajectory is not reproducible.
//! Selected only by explicit configuration, never by default.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::thread;

use parking_lot::Mutex;

use hlmrf_types::{KernelError, KernelResult};

use crate::hyperplane::Hyperplane;
use crate::store::clamp_unit;
use crate::term::ObjectiveTerm;

/// Shared variable arena holding f32 bit patterns in atomic slots.
pub(crate) struct AtomicValues {
    bits: Vec<AtomicU32>,
}

impl AtomicValues {
    pub(crate) fn from_values(values: &[f32]) -> Self {
        Self {
            bits: values.iter().map(|v| AtomicU32::new(v.to_bits())).collect(),
        }
    }

    #[inline]
    pub(crate) fn load(&self, index: usize) -> f32 {
        f32::from_bits(self.bits[index].load(Ordering::Relaxed))
    }

    /// Subtract `step` and clamp into [0, 1] in one atomic publish.
    pub(crate) fn apply_step(&self, index: usize, step: f32) {
        let slot = &self.bits[index];
        let mut current = slot.load(Ordering::Relaxed);
        loop {
            let updated = clamp_unit(f32::from_bits(current) - step).to_bits();
            match slot.compare_exchange_weak(current, updated, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<f32> {
        self.bits
            .iter()
            .map(|slot| f32::from_bits(slot.load(Ordering::Relaxed)))
            .collect()
    }
}

fn dot_shared(hyperplane: &Hyperplane, values: &AtomicValues) -> f32 {
    let mut sum = 0.0f32;
    for position in 0..hyperplane.len() {
        sum += hyperplane.coefficient(position) * values.load(hyperplane.index(position));
    }
    sum - hyperplane.constant()
}

#[derive(Default)]
struct EpochStats {
    active_terms: usize,
    failure: Option<String>,
}

/// Run one full epoch over `order` with `workers` threads.
///
/// The shared iteration counter is fetch-added once per term visit, so the
/// decaying step schedule stays consistent across the whole population.
/// Returns the number of terms whose gradient was applied.
pub(crate) fn hogwild_epoch(
    terms: &[Box<dyn ObjectiveTerm>],
    order: &[usize],
    workers: usize,
    values: &AtomicValues,
    iteration: &AtomicU64,
) -> KernelResult<usize> {
    let chunk_len = ((order.len() + workers - 1) / workers).max(1);
    let stats = Mutex::new(EpochStats::default());
    let stats_ref = &stats;

    thread::scope(|scope| {
        for chunk in order.chunks(chunk_len) {
            scope.spawn(move || {
                let mut active = 0usize;
                let mut failure = None;

                'visits: for &t in chunk {
                    let term = &terms[t];
                    let it = iteration.fetch_add(1, Ordering::Relaxed) + 1;
                    let hyperplane = term.hyperplane();
                    let dot = dot_shared(hyperplane, values);
                    if !term.is_active(dot) {
                        continue;
                    }
                    active += 1;
                    for position in 0..hyperplane.len() {
                        let step = term.gradient(it, position, dot);
                        if !step.is_finite() {
                            failure = Some(format!(
                                "non-finite gradient from term {t} at iteration {it}"
                            ));
                            break 'visits;
                        }
                        values.apply_step(hyperplane.index(position), step);
                    }
                }

                let mut stats = stats_ref.lock();
                stats.active_terms += active;
                if stats.failure.is_none() {
                    stats.failure = failure;
                }
            });
        }
    });

    let stats = stats.into_inner();
    match stats.failure {
        Some(message) => Err(KernelError::Numerical(message)),
        None => Ok(stats.active_terms),
    }
}
