//! Error types for bag-of-bigrams feature extraction.

use thiserror::Error;

/// Result type for feature extraction operations.
pub type Result<T> = std::result::Result<T, MuseError>;

/// Error types for feature extraction operations.
#[derive(Error, Debug)]
pub enum MuseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter '{param}' = '{value}': {reason}")]
    InvalidParameter {
        param: String,
        value: String,
        reason: String,
    },

    #[error("Dimension mismatch: sample {sample} has {got} variates, expected {expected}")]
    DimensionMismatch {
        sample: usize,
        expected: usize,
        got: usize,
    },

    #[error("Invalid class label: {0}")]
    InvalidLabel(String),

    #[error("Quantizer error for window length {window_length}: {reason}")]
    Quantizer {
        window_length: usize,
        reason: String,
    },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl MuseError {
    /// Convert to a stable numeric error code.
    pub fn to_code(&self) -> i32 {
        match self {
            MuseError::InvalidInput(_) => 1,
            MuseError::InvalidParameter { .. } => 2,
            MuseError::DimensionMismatch { .. } => 3,
            MuseError::InvalidLabel(_) => 4,
            MuseError::Quantizer { .. } => 5,
            MuseError::ThreadPool(_) => 6,
        }
    }

    pub(crate) fn invalid_parameter(
        param: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        MuseError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
