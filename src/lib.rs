//! Sheria: a resilient legal-records scraper
//!
//! This crate fetches case judgments, legislation listings and full judgment
//! text from a public legal-records website (with a fallback mirror) and
//! converts them into structured records for file output and search indexing.

pub mod categorize;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod index;
pub mod listing;
pub mod output;
pub mod pipeline;
pub mod records;

use thiserror::Error;

/// Main error type for Sheria operations
#[derive(Debug, Error)]
pub enum SheriaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sheria operations
pub type Result<T> = std::result::Result<T, SheriaError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{FetchEngine, FetchOutcome, FetchStatus};
pub use records::{ActRecord, AnalysisRecord, CaseRecord, DocumentType};
