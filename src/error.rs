use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error(transparent)]
    NotFound(#[from] ConfigurationNotFound),
}

/// The requested panel count has no entry in the site catalog.
///
/// This is an expected outcome rather than a fault: callers branch on it and
/// ask the matcher for the nearest available counts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No configuration with {panels} panels")]
pub struct ConfigurationNotFound {
    pub panels: u32,
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
