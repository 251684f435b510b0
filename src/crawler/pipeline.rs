//! Crawl pipeline - seed fan-out, link validation and keyword aggregation
//!
//! For every seed the pipeline:
//! 1. Fetches the seed page and extracts up to N absolute links
//! 2. Fetches every link and classifies it Valid (HTTP 200) or Invalid
//! 3. Scans the body of every valid link for keyword groups
//! 4. Merges the per-link tallies into one tally for the seed
//!
//! Two variants share these steps. [`Pipeline::run_sequential`] walks seeds
//! and links one at a time. [`Pipeline::run_concurrent`] launches every seed
//! at once and every link of a seed at once, joining each level with
//! `join_all`. Each future returns its own records and tally; aggregation
//! happens after the join, so no accumulator is shared between futures.

use crate::config::{Config, MatchMode, PipelineMode};
use crate::crawler::fetcher::{build_http_client, fetch_page, fetch_status, FetchOutcome};
use crate::crawler::keywords::{scan_keywords, KeywordGroups, KeywordTally};
use crate::crawler::parser::extract_links;
use crate::TallyError;
use futures::future::join_all;
use reqwest::Client;
use std::fmt;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Validity of a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    /// The link answered with HTTP 200
    Valid,
    /// Any other status, or no answer at all
    Invalid,
}

impl LinkStatus {
    /// Classifies an observed status code; `None` means the request failed
    pub fn from_status_code(status_code: Option<u16>) -> Self {
        match status_code {
            Some(200) => Self::Valid,
            _ => Self::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered link and its validity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkRecord {
    /// The seed page the link was found on
    pub parent: String,
    /// The link as written in the seed page
    pub link: String,
    pub status: LinkStatus,
    /// Observed HTTP status, `None` when the request failed
    pub status_code: Option<u16>,
}

impl LinkRecord {
    pub fn new(parent: &str, link: &str, status_code: Option<u16>) -> Self {
        Self {
            parent: parent.to_string(),
            link: link.to_string(),
            status: LinkStatus::from_status_code(status_code),
            status_code,
        }
    }
}

/// Keyword tally accumulated over all links of one seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTally {
    pub seed: String,
    pub tally: KeywordTally,
}

/// Everything a pipeline run produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// One record per discovered link, grouped by seed in seed order
    pub links: Vec<LinkRecord>,
    /// One tally per seed, in seed order, including empty tallies
    pub seeds: Vec<SeedTally>,
}

impl CrawlReport {
    fn from_seed_results(results: Vec<(Vec<LinkRecord>, SeedTally)>) -> Self {
        let mut report = Self::default();
        for (links, seed) in results {
            report.links.extend(links);
            report.seeds.push(seed);
        }
        report
    }

    pub fn valid_count(&self) -> usize {
        self.links.iter().filter(|r| r.status.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.links.len() - self.valid_count()
    }
}

/// The crawl pipeline and the state shared by both variants
pub struct Pipeline {
    client: Client,
    groups: KeywordGroups,
    match_mode: MatchMode,
    max_links_per_seed: usize,
    limiter: Option<Semaphore>,
}

impl Pipeline {
    /// Creates a pipeline from the configuration
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client shared by every request
    /// * `config` - Keyword groups, match mode and crawl limits
    pub fn new(client: Client, config: &Config) -> Self {
        let limiter = match config.crawler.max_concurrent_requests {
            0 => None,
            permits => Some(Semaphore::new(permits.min(Semaphore::MAX_PERMITS))),
        };

        Self {
            client,
            groups: config.effective_groups(),
            match_mode: config.keywords.match_mode,
            max_links_per_seed: config.crawler.max_links_per_seed,
            limiter,
        }
    }

    /// Waits for a request slot when a concurrency cap is configured
    async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        }
    }

    /// Fetches a seed page and returns its first absolute http(s) links
    ///
    /// Any fetch failure is logged and yields an empty list.
    pub async fn extract_seed_links(&self, seed: &str) -> Vec<String> {
        tracing::debug!("Extracting links from: {}", seed);

        let body = {
            let _permit = self.acquire().await;
            fetch_page(&self.client, seed).await
        };

        match body {
            Ok(html) => {
                let links = extract_links(&html, self.max_links_per_seed);
                tracing::debug!("Found {} links in {}", links.len(), seed);
                links
            }
            Err(e) => {
                tracing::error!("Error extracting links from {}: {}", seed, e);
                Vec::new()
            }
        }
    }

    /// Checks one link and scans its page when it is valid
    pub async fn check_link(&self, seed: &str, link: &str) -> (LinkRecord, KeywordTally) {
        tracing::debug!("Checking status for URL: {}", link);

        let outcome = {
            let _permit = self.acquire().await;
            fetch_status(&self.client, link).await
        };

        let record = LinkRecord::new(seed, link, outcome.status_code());
        let tally = match outcome {
            FetchOutcome::Status {
                body: Some(body), ..
            } if record.status.is_valid() => scan_keywords(&body, &self.groups, self.match_mode),
            FetchOutcome::Status { status_code, .. } => {
                tracing::debug!("{} answered with HTTP {}", link, status_code);
                KeywordTally::new()
            }
            FetchOutcome::Unreachable { error } => {
                tracing::error!("Error fetching {}: {}", link, error);
                KeywordTally::new()
            }
        };

        (record, tally)
    }

    /// Runs every seed and every link strictly one after another
    pub async fn run_sequential(&self, seeds: &[String]) -> CrawlReport {
        let mut results = Vec::with_capacity(seeds.len());

        for seed in seeds {
            tracing::info!("Processing URL: {}", seed);
            let links = self.extract_seed_links(seed).await;

            let mut checked = Vec::with_capacity(links.len());
            for link in &links {
                checked.push(self.check_link(seed, link).await);
            }

            results.push(aggregate_seed(seed, checked));
        }

        CrawlReport::from_seed_results(results)
    }

    /// Runs all seeds concurrently, and all links of each seed concurrently
    pub async fn run_concurrent(&self, seeds: &[String]) -> CrawlReport {
        let results = join_all(seeds.iter().map(|seed| self.process_seed_concurrent(seed))).await;
        CrawlReport::from_seed_results(results)
    }

    async fn process_seed_concurrent(&self, seed: &str) -> (Vec<LinkRecord>, SeedTally) {
        tracing::info!("Processing URL: {}", seed);
        let links = self.extract_seed_links(seed).await;

        let checked = join_all(links.iter().map(|link| self.check_link(seed, link))).await;
        aggregate_seed(seed, checked)
    }

    /// Runs the variant selected by `mode`
    pub async fn run(&self, mode: PipelineMode, seeds: &[String]) -> CrawlReport {
        match mode {
            PipelineMode::Sequential => self.run_sequential(seeds).await,
            PipelineMode::Concurrent => self.run_concurrent(seeds).await,
        }
    }
}

/// Collects the link records of one seed and merges their tallies
fn aggregate_seed(
    seed: &str,
    checked: Vec<(LinkRecord, KeywordTally)>,
) -> (Vec<LinkRecord>, SeedTally) {
    let mut records = Vec::with_capacity(checked.len());
    let mut tally = KeywordTally::new();

    for (record, link_tally) in checked {
        records.push(record);
        tally.merge(link_tally);
    }

    tracing::debug!(
        "{}: {} links checked, {} keyword hits",
        seed,
        records.len(),
        tally.total()
    );

    (
        records,
        SeedTally {
            seed: seed.to_string(),
            tally,
        },
    )
}

/// Runs a complete crawl for the configuration
///
/// Builds the shared HTTP client and dispatches to the configured variant.
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Link records and per-seed tallies
/// * `Err(TallyError)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use link_tally::config::Config;
/// use link_tally::crawler::run_pipeline;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_pipeline(&Config::default()).await?;
/// println!("{} links discovered", report.links.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: &Config) -> Result<CrawlReport, TallyError> {
    let client = build_http_client(&config.crawler)?;
    let pipeline = Pipeline::new(client, config);

    tracing::info!(
        "Running {} pipeline over {} seeds with {} keyword groups ({})",
        config.crawler.mode,
        config.seeds.len(),
        pipeline.groups.len(),
        pipeline.match_mode
    );

    Ok(pipeline.run(config.crawler.mode, &config.seeds).await)
}
