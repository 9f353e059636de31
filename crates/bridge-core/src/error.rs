use thiserror::Error;

/// Errors that abort a harmonization run.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The base metadata table is empty; there is nothing to harmonize.
    #[error("base variable metadata is empty")]
    EmptyMetadata,

    /// The base table violates the `(year, variable_name)` uniqueness invariant.
    #[error("duplicate base record for {variable_name} in {year}")]
    DuplicateRecord { year: i32, variable_name: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
