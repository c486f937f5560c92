use thiserror::Error;

use crate::api::ApiError;
use crate::models::MappingError;

/// Failure surfaced by the catalog to its consumers.
///
/// Each variant carries a human-readable cause. Consumers decide how to
/// present it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<ApiError> for CatalogError {
    fn from(err: ApiError) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<MappingError> for CatalogError {
    fn from(err: MappingError) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
