//! Error types for building and stepping a simulation

/// Simulation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    /// Normalization of a zero or near-zero vector. Callers treat this as
    /// "no rotation" / "no force" rather than a failure.
    #[error("cannot normalize vector of magnitude {0:e}")]
    DegenerateVector(f64),

    /// Rejection sampling of initial particle positions ran out of attempts
    #[error("placed only {accepted} of {requested} particles after {attempts} attempts; bottle geometry rejects too many samples")]
    SamplingExhaustion {
        accepted: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type SimResult<T> = Result<T, SimError>;
