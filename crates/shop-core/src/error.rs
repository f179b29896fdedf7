//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `ShopError` as one
//! variant where they need to surface it.

use thiserror::Error;

use crate::{AgentId, StationId};

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("aisle '{0}' not found")]
    AisleNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ShopResult<T> = Result<T, ShopError>;
