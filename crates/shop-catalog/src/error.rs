use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate aisle name '{0}'")]
    DuplicateAisle(String),

    #[error("unknown aisle class '{0}'")]
    UnknownClass(String),

    #[error("catalog exceeds the maximum number of aisles")]
    TooManyAisles,

    #[error("catalog parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
