use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FokkerPlanckError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("solver has not been initialized; call initialize() first")]
    Uninitialized,

    #[error("field `{field}` has shape {actual:?}, grid expects {expected:?}")]
    ShapeMismatch {
        field: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("numerical instability at step {step}: {detail}")]
    NumericalInstability { step: usize, detail: String },
}

pub type Result<T> = std::result::Result<T, FokkerPlanckError>;

impl FokkerPlanckError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FokkerPlanckError::Configuration(msg.into())
    }
}
