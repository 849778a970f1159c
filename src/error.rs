use thiserror::Error;

/// Estimator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    /// Caller supplied an out-of-domain value (distance, mix, CLI argument)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Configured constants would make the model meaningless
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EstimatorError {
    /// Stable snake-case name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Configuration(_) => "configuration_error",
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
