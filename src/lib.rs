//! Link-Tally: a link health and keyword incidence crawler
//!
//! This crate crawls a list of seed URLs, validates the outbound links found on
//! each seed page, counts keyword-group hits on the pages that respond, and
//! writes CSV tables and HTML bar charts summarizing the results.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;

use thiserror::Error;

/// Main error type for Link-Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Result type alias for Link-Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, MatchMode, PipelineMode};
pub use crawler::{
    run_pipeline, CrawlReport, KeywordGroup, KeywordGroups, KeywordTally, LinkRecord, LinkStatus,
    SeedTally,
};
