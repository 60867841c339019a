//! Errors raised while building screens

use app_core::catalog::CatalogError;
use app_core::models::SeasonName;
use thiserror::Error;

/// Shell and screen errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// Catalog content failed validation
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The analysis result season is missing from the catalog
    #[error("Color season not in catalog: {0}")]
    SeasonUnavailable(SeasonName),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
