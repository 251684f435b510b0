//! Crawler module for link discovery, validation and keyword scanning
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of seed pages and discovered links
//! - HTML parsing and link extraction
//! - Keyword group scanning and tallying
//! - The sequential and concurrent crawl pipelines

mod fetcher;
mod keywords;
mod parser;
mod pipeline;

pub use fetcher::{build_http_client, fetch_page, fetch_status, FetchOutcome};
pub use keywords::{scan_keywords, KeywordGroup, KeywordGroups, KeywordTally};
pub use parser::extract_links;
pub use pipeline::{run_pipeline, CrawlReport, LinkRecord, LinkStatus, Pipeline, SeedTally};
