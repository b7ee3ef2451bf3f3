// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Objective Term Family
// ─────────────────────────────────────────────────────────────────────
//! Potential functions over hyperplane values.
//!
//! Every term is a scalar potential `weight * g(dot)` for a per-family
//! function `g`, where `dot` is its hyperplane evaluated at the current
//! variable values. Three families:
//! - `HingeLossTerm`:        g(d) = max(0, d)
//! - `SquaredHingeLossTerm`: g(d) = max(0, d)²
//! - `LinearLossTerm`:       g(d) = d (gradient always applied)
//!
//! New families implement `ObjectiveTerm`; the epoch driver needs no
//! change.

use hlmrf_types::{KernelError, KernelResult};

use crate::hyperplane::Hyperplane;
use crate::store::VariableStore;

/// State shared by every term family: one hyperplane, a non-negative
/// weight, a base learning rate.
#[derive(Debug, Clone)]
struct TermBase {
    hyperplane: Hyperplane,
    weight: f32,
    learning_rate: f32,
}

impl TermBase {
    fn new(hyperplane: Hyperplane, weight: f32, learning_rate: f32) -> KernelResult<Self> {
        check_weight(weight)?;
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(KernelError::Validation(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        Ok(Self {
            hyperplane,
            weight,
            learning_rate,
        })
    }

    /// Diminishing-schedule factor common to every family's gradient:
    /// `weight * learning_rate / iteration`, with a 1-based iteration.
    #[inline]
    fn step_scale(&self, iteration: u64) -> f32 {
        debug_assert!(iteration >= 1, "iteration counter is 1-based");
        self.weight * (self.learning_rate / iteration as f32)
    }
}

fn check_weight(weight: f32) -> KernelResult<()> {
    if !(weight.is_finite() && weight >= 0.0) {
        return Err(KernelError::Validation(format!(
            "term weight must be finite and non-negative, got {weight}"
        )));
    }
    Ok(())
}

/// Contract shared by every potential family.
///
/// The driver computes `dot` once per visit and gates gradient application
/// on `is_active`: families define their derivative for the active regime
/// only, and applying a step to an inactive term would be a logic error.
pub trait ObjectiveTerm: Send + Sync {
    fn hyperplane(&self) -> &Hyperplane;

    fn weight(&self) -> f32;

    /// Weight learning mutates weights between runs; never during one.
    fn set_weight(&mut self, weight: f32) -> KernelResult<()>;

    fn learning_rate(&self) -> f32;

    /// Unweighted penalty `g(dot)`.
    fn incompatibility(&self, dot: f32) -> f32;

    /// Whether the gradient is non-zero in the current state.
    fn is_active(&self, dot: f32) -> bool;

    /// Step to subtract from the variable at `position` in the hyperplane,
    /// for the given 1-based global iteration. Called once per referenced
    /// variable per visit; aggregation across terms sharing a variable
    /// happens through sequential application.
    fn gradient(&self, iteration: u64, position: usize, dot: f32) -> f32;

    /// Weighted potential `weight * g(dot)`. Pure, no mutation.
    fn potential(&self, dot: f32) -> f32 {
        self.weight() * self.incompatibility(dot)
    }

    /// Potential at the store's current state.
    fn evaluate(&self, store: &VariableStore) -> f32 {
        self.potential(self.hyperplane().dot(store.values()))
    }

    /// Ground-rule satisfaction in [0, 1]: `1 − g(dot)`, clamped.
    fn satisfaction(&self, dot: f32) -> f32 {
        (1.0 - self.incompatibility(dot)).clamp(0.0, 1.0)
    }
}

/// Objective term of the form `weight * max(0, coeffs^T x − constant)`.
pub struct HingeLossTerm {
    base: TermBase,
}

impl HingeLossTerm {
    pub fn new(hyperplane: Hyperplane, weight: f32, learning_rate: f32) -> KernelResult<Self> {
        Ok(Self {
            base: TermBase::new(hyperplane, weight, learning_rate)?,
        })
    }
}

impl ObjectiveTerm for HingeLossTerm {
    fn hyperplane(&self) -> &Hyperplane {
        &self.base.hyperplane
    }

    fn weight(&self) -> f32 {
        self.base.weight
    }

    fn set_weight(&mut self, weight: f32) -> KernelResult<()> {
        check_weight(weight)?;
        self.base.weight = weight;
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.base.learning_rate
    }

    fn incompatibility(&self, dot: f32) -> f32 {
        dot.max(0.0)
    }

    fn is_active(&self, dot: f32) -> bool {
        dot > 0.0
    }

    fn gradient(&self, iteration: u64, position: usize, _dot: f32) -> f32 {
        self.base.step_scale(iteration) * self.base.hyperplane.coefficient(position)
    }
}

/// Objective term of the form `weight * max(0, coeffs^T x − constant)²`.
pub struct SquaredHingeLossTerm {
    base: TermBase,
}

impl SquaredHingeLossTerm {
    pub fn new(hyperplane: Hyperplane, weight: f32, learning_rate: f32) -> KernelResult<Self> {
        Ok(Self {
            base: TermBase::new(hyperplane, weight, learning_rate)?,
        })
    }
}

impl ObjectiveTerm for SquaredHingeLossTerm {
    fn hyperplane(&self) -> &Hyperplane {
        &self.base.hyperplane
    }

    fn weight(&self) -> f32 {
        self.base.weight
    }

    fn set_weight(&mut self, weight: f32) -> KernelResult<()> {
        check_weight(weight)?;
        self.base.weight = weight;
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.base.learning_rate
    }

    fn incompatibility(&self, dot: f32) -> f32 {
        let d = dot.max(0.0);
        d * d
    }

    fn is_active(&self, dot: f32) -> bool {
        dot > 0.0
    }

    fn gradient(&self, iteration: u64, position: usize, dot: f32) -> f32 {
        self.base.step_scale(iteration) * 2.0 * dot * self.base.hyperplane.coefficient(position)
    }
}

/// Objective term of the form `weight * (coeffs^T x − constant)`.
///
/// Always active: the gradient is applied in every state, driving the
/// linear expression down regardless of sign.
pub struct LinearLossTerm {
    base: TermBase,
}

impl LinearLossTerm {
    pub fn new(hyperplane: Hyperplane, weight: f32, learning_rate: f32) -> KernelResult<Self> {
        Ok(Self {
            base: TermBase::new(hyperplane, weight, learning_rate)?,
        })
    }
}

impl ObjectiveTerm for LinearLossTerm {
    fn hyperplane(&self) -> &Hyperplane {
        &self.base.hyperplane
    }

    fn weight(&self) -> f32 {
        self.base.weight
    }

    fn set_weight(&mut self, weight: f32) -> KernelResult<()> {
        check_weight(weight)?;
        self.base.weight = weight;
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.base.learning_rate
    }

    fn incompatibility(&self, dot: f32) -> f32 {
        dot
    }

    fn is_active(&self, _dot: f32) -> bool {
        true
    }

    fn gradient(&self, iteration: u64, position: usize, _dot: f32) -> f32 {
        self.base.step_scale(iteration) * self.base.hyperplane.coefficient(position)
    }
}
