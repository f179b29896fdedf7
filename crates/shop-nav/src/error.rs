use shop_core::{AgentId, Point};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("agent {0} has not been placed on the floor")]
    NotPlaced(AgentId),

    #[error("destination {to} is unreachable for agent {agent}")]
    Unreachable { agent: AgentId, to: Point },
}

pub type NavResult<T> = Result<T, NavError>;
