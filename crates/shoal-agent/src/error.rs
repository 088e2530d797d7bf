use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid tunables: {0}")]
    InvalidTunables(String),

    #[error("invalid spawn parameters: {0}")]
    InvalidSpawn(String),

    #[error("population parse error: {0}")]
    Parse(String),

    #[error("agent store is full ({0} agents)")]
    Capacity(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
