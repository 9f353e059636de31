use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid year range: {first}..={last}")]
    InvalidYearRange { first: i32, last: i32 },
    #[error("unknown expansion mode: {0}")]
    UnknownExpansionMode(String),
    #[error("unknown confirmed scope: {0}")]
    UnknownConfirmedScope(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
