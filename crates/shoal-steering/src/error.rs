use thiserror::Error;

use shoal_core::CoreError;

#[derive(Debug, Error)]
pub enum SteeringError {
    #[error("steering configuration error: {0}")]
    Config(#[from] CoreError),
}

pub type SteeringResult<T> = Result<T, SteeringError>;
