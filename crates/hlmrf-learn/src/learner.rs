// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — Maximum-Likelihood Weight Learner
// ─────────────────────────────────────────────────────────────────────
//! Adjusts rule weights from labeled data by repeatedly driving inference.
//!
//! The likelihood gradient for a rule is the difference between its
//! aggregate incompatibility at the inferred (MPE) state and at the
//! labeled truth state. Each step: re-run inference with the current
//! weights, then
//!
//!   w_r ← max(0, w_r + step_size · (expected_r − observed_r))
//!
//! A rule whose grounding violates the labels more than the inference
//! does gets weaker; one the inference violates more gets stronger.

use hlmrf_sgd::{ObjectiveTerm, SgdReasoner, VariableStore};
use hlmrf_types::{KernelError, KernelResult, LearnConfig, LearnOutcome};

/// Maximum-likelihood weight learner over a rule→terms partition of the
/// reasoner's term collection.
///
/// The partition is supplied by the grounding layer: every ground term
/// belongs to exactly one first-order rule, and all terms of a rule share
/// the rule weight.
pub struct WeightLearner {
    config: LearnConfig,
    rules: Vec<Vec<usize>>,
}

impl WeightLearner {
    pub fn new(rules: Vec<Vec<usize>>, config: LearnConfig) -> KernelResult<Self> {
        config.validate()?;
        if rules.is_empty() {
            return Err(KernelError::Validation("rule partition is empty".to_string()));
        }
        for (r, rule) in rules.iter().enumerate() {
            if rule.is_empty() {
                return Err(KernelError::Validation(format!(
                    "rule {r} has no ground terms"
                )));
            }
        }
        Ok(Self { config, rules })
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Aggregate unweighted incompatibility of one rule's ground terms at
    /// the given state.
    fn rule_incompatibility(reasoner: &SgdReasoner, rule: &[usize], values: &[f32]) -> f32 {
        rule.iter()
            .map(|&t| {
                let term = &reasoner.terms()[t];
                term.incompatibility(term.hyperplane().dot(values))
            })
            .sum()
    }

    /// Learn rule weights against a labeled truth store.
    ///
    /// `store` is the working store for inference, warm-started across
    /// steps; `truth` holds the labeled values over the same variables.
    /// The reasoner's weights are left at the learned values.
    pub fn learn(
        &self,
        reasoner: &mut SgdReasoner,
        store: &mut VariableStore,
        truth: &VariableStore,
    ) -> KernelResult<LearnOutcome> {
        if truth.len() != store.len() {
            return Err(KernelError::Validation(format!(
                "truth store holds {} variables, working store {}",
                truth.len(),
                store.len()
            )));
        }
        for (r, rule) in self.rules.iter().enumerate() {
            for &t in rule {
                if t >= reasoner.term_count() {
                    return Err(KernelError::Validation(format!(
                        "rule {r} references term {t} but the reasoner holds {}",
                        reasoner.term_count()
                    )));
                }
            }
        }

        // Every term of a rule carries the rule weight; the first term is
        // authoritative at the start of learning.
        let mut weights: Vec<f32> = self
            .rules
            .iter()
            .map(|rule| reasoner.terms()[rule[0]].weight())
            .collect();
        for (rule, &weight) in self.rules.iter().zip(weights.iter()) {
            for &t in rule {
                reasoner.set_weight(t, weight)?;
            }
        }

        let observed: Vec<f32> = self
            .rules
            .iter()
            .map(|rule| Self::rule_incompatibility(reasoner, rule, truth.values()))
            .collect();

        let mut final_objective = 0.0;
        let mut steps_run = 0;

        for step in 1..=self.config.steps {
            let outcome = reasoner.run(
                store,
                self.config.inference_epochs,
                self.config.inference_tolerance,
            )?;
            final_objective = outcome.final_objective;
            steps_run = step;

            let mut moved = 0.0f32;
            for (r, rule) in self.rules.iter().enumerate() {
                let expected = Self::rule_incompatibility(reasoner, rule, store.values());
                let updated =
                    (weights[r] + self.config.step_size * (expected - observed[r])).max(0.0);
                moved += (updated - weights[r]).abs();
                weights[r] = updated;
                for &t in rule {
                    reasoner.set_weight(t, updated)?;
                }
            }
            log::debug!(
                "weight step {step}: moved={moved:.6} objective={final_objective:.6}"
            );

            if moved == 0.0 {
                break;
            }
        }

        log::info!(
            "weight learning finished after {steps_run} steps, objective={final_objective:.6}"
        );

        Ok(LearnOutcome {
            weights,
            steps_run,
            final_objective,
        })
    }
}
