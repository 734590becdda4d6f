use thiserror::Error;

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid positive amount.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("invalid simulation input: {reason}")]
    InvalidInput { reason: String },
}

impl SimulationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SimulationError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Text shown to the person who typed the amount.
    pub fn user_message(&self) -> &'static str {
        match self {
            SimulationError::InvalidInput { .. } => INVALID_AMOUNT_MESSAGE,
        }
    }
}
