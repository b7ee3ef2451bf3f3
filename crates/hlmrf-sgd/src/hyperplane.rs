// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Hyperplane
// ─────────────────────────────────────────────────────────────────────
//! Immutable linear-function descriptor underlying every objective term.
//!
//! Represents the affine function `f(x) = Σ coeff_i * x_i − constant`
//! over variables addressed by index into the variable store.

use hlmrf_types::{KernelError, KernelResult};

/// Ordered (variable index, coefficient) pairs plus a scalar constant.
///
/// Every coefficient is non-zero: a zero-coefficient entry would contribute
/// no gradient and is rejected at construction. Immutable after
/// construction; owned by exactly one term.
#[derive(Debug, Clone)]
pub struct Hyperplane {
    indexes: Vec<usize>,
    coefficients: Vec<f32>,
    constant: f32,
}

impl Hyperplane {
    /// Build from validated (variable index, coefficient) pairs.
    ///
    /// Rejects an empty pair list, zero or non-finite coefficients,
    /// duplicate variable indexes, and a non-finite constant. These are
    /// grounding-layer defects and fatal before optimization begins.
    pub fn new(entries: &[(usize, f32)], constant: f32) -> KernelResult<Self> {
        if entries.is_empty() {
            return Err(KernelError::Grounding(
                "hyperplane has no variables".to_string(),
            ));
        }
        if !constant.is_finite() {
            return Err(KernelError::Grounding(format!(
                "hyperplane constant is not finite: {constant}"
            )));
        }

        let mut indexes = Vec::with_capacity(entries.len());
        let mut coefficients = Vec::with_capacity(entries.len());
        for &(index, coefficient) in entries {
            if coefficient == 0.0 {
                return Err(KernelError::Grounding(format!(
                    "zero coefficient for variable {index}"
                )));
            }
            if !coefficient.is_finite() {
                return Err(KernelError::Grounding(format!(
                    "non-finite coefficient {coefficient} for variable {index}"
                )));
            }
            indexes.push(index);
            coefficients.push(coefficient);
        }

        let mut sorted = indexes.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(KernelError::Grounding(
                "duplicate variable index in hyperplane".to_string(),
            ));
        }

        Ok(Self {
            indexes,
            coefficients,
            constant,
        })
    }

    /// Number of referenced variables.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Always false: construction rejects empty hyperplanes.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Variable index at `position`.
    #[inline]
    pub fn index(&self, position: usize) -> usize {
        self.indexes[position]
    }

    /// Coefficient at `position`.
    #[inline]
    pub fn coefficient(&self, position: usize) -> f32 {
        self.coefficients[position]
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    pub fn constant(&self) -> f32 {
        self.constant
    }

    /// Largest referenced variable index, for bind-time range validation.
    pub fn max_index(&self) -> usize {
        self.indexes.iter().copied().max().unwrap_or(0)
    }

    /// `Σ coeff_i * values[idx_i] − constant` in one pass. No side effects.
    ///
    /// Indexes are trusted to be in range: the reasoner validates every
    /// hyperplane against the store before the first epoch.
    #[inline]
    pub fn dot(&self, values: &[f32]) -> f32 {
        let mut sum = 0.0f32;
        for (index, coefficient) in self.indexes.iter().zip(self.coefficients.iter()) {
            sum += coefficient * values[*index];
        }
        sum - self.constant
    }
}
