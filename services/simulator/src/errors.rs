use shared::errors::ServiceError;
use shared::{BeanColor, ValidationError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Supply exhausted: no {color:?} beans left")]
    SupplyExhausted { color: BeanColor },

    #[error("No bean to take from {container}")]
    NoBeanToTake { container: &'static str },

    #[error("No empty slot in {container}")]
    NoEmptySlot { container: &'static str },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SimulationError {
    /// Convert into the structured error envelope used in run reports
    pub fn to_service_error(&self) -> ServiceError {
        match self {
            SimulationError::SupplyExhausted { color } => ServiceError::supply_exhausted(*color),
            SimulationError::NoBeanToTake { container } => {
                ServiceError::container_empty(*container)
            }
            SimulationError::NoEmptySlot { container } => ServiceError::container_full(*container),
            SimulationError::Validation(ValidationError::InvalidBeanSymbol(symbol)) => {
                ServiceError::invalid_bean(symbol)
            }
            SimulationError::Validation(e) => ServiceError::invalid_tin(e.to_string()),
        }
    }
}

impl From<SimulationError> for ServiceError {
    fn from(error: SimulationError) -> Self {
        error.to_service_error()
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
