//! Output module for crawl reports
//!
//! This module handles:
//! - Writing link validity and keyword frequency tables as CSV
//! - Rendering bar charts as self-contained HTML pages
//! - Computing and printing run statistics

mod chart;
mod csv_report;
pub mod stats;

pub use chart::{write_chart, Bar, BarChart, BarColor, Callout, Orientation};
pub use csv_report::{write_keyword_csv, write_link_csv};
pub use stats::{compute_statistics, print_statistics, RunStatistics};

use thiserror::Error;

/// Errors that can occur while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
