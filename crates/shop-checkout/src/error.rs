use shop_core::{AgentId, StationId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout station {0} does not exist")]
    UnknownStation(StationId),

    #[error("agent {agent} is already queued at station {station}")]
    AlreadyQueued { agent: AgentId, station: StationId },
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;
