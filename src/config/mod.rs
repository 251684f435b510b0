//! Configuration module for Link-Tally
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a built-in default, so running without a file crawls the
//! default seed list with the default keyword groups.
//!
//! # Example
//!
//! ```no_run
//! use link_tally::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-tally.toml")).unwrap();
//! println!("Crawling {} seeds", config.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_keyword_groups, default_seeds, Config, CrawlerConfig, KeywordConfig, MatchMode,
    OutputConfig, PipelineMode,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
