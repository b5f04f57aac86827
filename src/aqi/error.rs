use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqiError {
    /// Negative or non-numeric concentration, negative index, bad table data
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown pollutant: {0}")]
    UnknownPollutant(String),

    #[error("insufficient data: no pollutant with a computable sub-index")]
    EmptySample,

    #[error("prediction model unavailable: {0}")]
    ModelUnavailable(String),
}

impl AqiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AqiError::InvalidInput(message.into())
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        AqiError::ModelUnavailable(message.into())
    }
}
