use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("unknown brain kind: {0:?}")]
    UnknownBrain(String),

    #[error("brain configuration error: {0}")]
    Config(String),
}

pub type BrainResult<T> = Result<T, BrainError>;
