use shop_core::ShopError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ShopError),

    #[error("at least one checkout station is required")]
    NoStations,

    #[error("store catalog has no aisles")]
    EmptyCatalog,
}

pub type SimResult<T> = Result<T, SimError>;
