//! Common error types for the Mutiny event scraper

use thiserror::Error;

/// Common result type for scraper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the scraper crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A source adapter failed to produce records
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// Geocoding request, response, or parse failure
    #[error("Geocoding error: {0}")]
    Geocode(String),
}
