use thiserror::Error;

use crate::api::FetchError;
use crate::parser::ParseError;

/// Errors surfaced by [`crate::TourService`] when no cached snapshot can
/// stand in for the failed operation.
#[derive(Error, Debug)]
pub enum TourError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote fetch failed: {0}")]
    RemoteFetch(#[from] FetchError),

    #[error("Malformed sheet data: {0}")]
    MalformedInput(#[from] ParseError),
}

impl TourError {
    /// Short machine-readable kind, for front ends that report errors as data.
    pub fn kind(&self) -> &'static str {
        match self {
            TourError::Configuration(_) => "configuration",
            TourError::RemoteFetch(_) => "remote_fetch",
            TourError::MalformedInput(_) => "malformed_input",
        }
    }
}
