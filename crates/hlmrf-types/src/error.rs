// ─────────────────────────────────────────────────────────────────────
// Grounded Relational Inference — HL-MRF Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all HL-MRF kernel failures.
#[derive(Error, Debug)]
pub enum KernelError {
    /// Malformed term input from the grounding layer: zero coefficient,
    /// empty hyperplane, duplicate or out-of-range variable index.
    #[error("grounding error: {0}")]
    Grounding(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input (weights, truth values, rule partition).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type KernelResult<T> = Result<T, KernelError>;
