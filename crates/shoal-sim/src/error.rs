use shoal_agent::AgentError;
use shoal_core::CoreError;
use shoal_kinematics::KinematicsError;
use shoal_steering::SteeringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("steering error: {0}")]
    Steering(#[from] SteeringError),

    #[error("kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
