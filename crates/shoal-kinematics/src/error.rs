use thiserror::Error;

#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("time step must be finite and non-negative (got {0})")]
    InvalidTimeStep(f32),
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;
