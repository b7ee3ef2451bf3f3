// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Variable Store
// ─────────────────────────────────────────────────────────────────────
//! Dense arena of current atom truth values, addressed by integer index.
//!
//! Terms hold indexes, never ownership. The store is the only mutable
//! shared resource of a reasoning run; it is passed into the reasoner by
//! reference and its final values are the inference answer.

use hlmrf_types::{KernelError, KernelResult};

/// Clamp a truth value into [0, 1].
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Index-addressable vector of atom truth values in [0, 1].
#[derive(Debug, Clone)]
pub struct VariableStore {
    values: Vec<f32>,
}

impl VariableStore {
    /// Allocate `len` variables, all initialised to 0.
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// Build from pre-populated values.
    ///
    /// Non-finite entries are a fatal input defect. Finite values outside
    /// [0, 1] are clamped with a warning.
    pub fn from_values(mut values: Vec<f32>) -> KernelResult<Self> {
        for (index, value) in values.iter_mut().enumerate() {
            if !value.is_finite() {
                return Err(KernelError::Validation(format!(
                    "non-finite initial value {value} for variable {index}"
                )));
            }
            if *value < 0.0 || *value > 1.0 {
                log::warn!(
                    "initial value {value:.4} for variable {index} clamped into [0, 1]"
                );
                *value = clamp_unit(*value);
            }
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the current value of one variable.
    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// All current values, in index order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Write one variable.
    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        self.values[index] = value;
    }

    /// Write then clamp into [0, 1]. Applied after every gradient step:
    /// values are soft truth values and the unconstrained subgradient step
    /// can overshoot the valid range.
    #[inline]
    pub fn set_clamped(&mut self, index: usize, value: f32) {
        self.values[index] = clamp_unit(value);
    }

    /// Copy of the current state, for convergence bookkeeping.
    pub fn snapshot(&self) -> Vec<f32> {
        self.values.clone()
    }

    /// Aggregate L1 distance from a previous snapshot.
    pub fn movement_since(&self, previous: &[f32]) -> f32 {
        self.values
            .iter()
            .zip(previous.iter())
            .map(|(now, then)| (now - then).abs())
            .sum()
    }

    /// Overwrite all values from a slice of the same length.
    pub(crate) fn copy_from(&mut self, values: &[f32]) {
        self.values.copy_from_slice(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let store = VariableStore::new(4);
        assert_eq!(store.len(), 4);
        assert!(store.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_values_clamps_out_of_range() {
        let store = VariableStore::from_values(vec![-0.5, 0.5, 1.5]).unwrap();
        assert_eq!(store.value(0), 0.0);
        assert_eq!(store.value(1), 0.5);
        assert_eq!(store.value(2), 1.0);
    }

    #[test]
    fn test_from_values_rejects_nan() {
        assert!(VariableStore::from_values(vec![0.5, f32::NAN]).is_err());
    }

    #[test]
    fn test_set_clamped_overshoot() {
        let mut store = VariableStore::new(1);
        store.set_clamped(0, 1.7);
        assert_eq!(store.value(0), 1.0);
        store.set_clamped(0, -0.2);
        assert_eq!(store.value(0), 0.0);
    }

    #[test]
    fn test_movement_since() {
        let mut store = VariableStore::from_values(vec![0.2, 0.8]).unwrap();
        let before = store.snapshot();
        store.set_clamped(0, 0.5);
        store.set_clamped(1, 0.7);
        assert!((store.movement_since(&before) - 0.4).abs() < 1e-6);
    }
}
