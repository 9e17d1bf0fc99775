use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the weekly report
#[derive(Error, Debug)]
pub enum ReportError {
    /// The deal feed could not be reached
    #[error("Failed to fetch deals: {0}")]
    DealSource(#[from] reqwest::Error),

    /// The deal feed answered with something that is not a list of deals
    #[error("Invalid deal feed: {0}")]
    InvalidDeals(String),

    /// The page template failed to render
    #[error("Failed to render report: {0}")]
    Render(#[from] askama::Error),

    /// The rendered report could not be written to disk
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the text-generation capability
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No usable provider: missing credential, unknown or disabled provider
    #[error("Text generation unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but the payload is not what we asked for
    #[error("Invalid response from text generator: {0}")]
    InvalidResponse(String),

    /// Network, TLS or HTTP client failure
    #[error("Request to text generator failed: {0}")]
    Request(#[from] reqwest::Error),
}
