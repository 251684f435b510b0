use crate::crawler::{KeywordGroup, KeywordGroups};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for Link-Tally
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URLs to crawl, in order
    #[serde(default = "default_seeds")]
    pub seeds: Vec<String>,

    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
            crawler: CrawlerConfig::default(),
            keywords: KeywordConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the keyword groups the scanner should use
    ///
    /// When `flatten-groups` is set every keyword becomes its own group.
    pub fn effective_groups(&self) -> KeywordGroups {
        if self.keywords.flatten_groups {
            self.keywords.groups.flattened()
        } else {
            self.keywords.groups.clone()
        }
    }
}

/// Which pipeline variant drives the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Seeds and links are processed one after another
    Sequential,
    /// Seeds and their links are fanned out as concurrent futures
    #[default]
    Concurrent,
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// How a keyword group scores against a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// The group counts once if any of its keywords appears
    #[default]
    AnyMember,
    /// The group counts once for every keyword that appears
    EachKeyword,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyMember => write!(f, "any-member"),
            Self::EachKeyword => write!(f, "each-keyword"),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Timeout applied to every HTTP request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of links kept from each seed page
    #[serde(rename = "max-links-per-seed", default = "default_max_links")]
    pub max_links_per_seed: usize,

    /// Pipeline variant
    #[serde(default)]
    pub mode: PipelineMode,

    /// Upper bound on in-flight requests in concurrent mode (0 = unbounded)
    #[serde(rename = "max-concurrent-requests", default)]
    pub max_concurrent_requests: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            max_links_per_seed: default_max_links(),
            mode: PipelineMode::default(),
            max_concurrent_requests: 0,
            user_agent: default_user_agent(),
        }
    }
}

/// Keyword scanning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    #[serde(rename = "match-mode", default)]
    pub match_mode: MatchMode,

    /// Split every group into singleton groups before scanning
    #[serde(rename = "flatten-groups", default)]
    pub flatten_groups: bool,

    #[serde(default = "default_keyword_groups")]
    pub groups: KeywordGroups,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            flatten_groups: false,
            groups: default_keyword_groups(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the CSV and chart files
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory receiving the log file
    #[serde(rename = "logs-dir", default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    /// Stem of the log file name
    #[serde(rename = "log-identifier", default = "default_log_identifier")]
    pub log_identifier: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            logs_dir: default_logs_dir(),
            log_identifier: default_log_identifier(),
        }
    }
}

impl OutputConfig {
    pub fn link_csv_path(&self) -> PathBuf {
        self.output_dir.join("valid_links.csv")
    }

    pub fn keyword_csv_path(&self) -> PathBuf {
        self.output_dir.join("keyword_stats.csv")
    }

    pub fn link_chart_path(&self) -> PathBuf {
        self.output_dir.join("valid_links_graphs.html")
    }

    pub fn keyword_chart_path(&self) -> PathBuf {
        self.output_dir.join("keyword_stats_graphs.html")
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.logs_dir.join(format!("{}.log", self.log_identifier))
    }
}

/// The built-in seed list
pub fn default_seeds() -> Vec<String> {
    [
        "https://sanctionssearch.ofac.treas.gov/",
        "https://home.treasury.gov/",
        "https://www.thomsonreuters.com/",
        "https://verafin.com/solution/",
        "https://www.swift.com/",
        "https://anti-fraud.ec.europa.eu/index_en",
        "https://www.kroll.com/",
        "https://learn.seon.io/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The built-in keyword groups
pub fn default_keyword_groups() -> KeywordGroups {
    let groups: [&[&str]; 6] = [
        &["Sanctions", "OFAC"],
        &["Foreign Sanctions", "Balkans"],
        &["ESG trends", "Corporate income tax"],
        &["European Parliament", "customs fraud"],
        &["Cybersecurity", "OLAF"],
        &["Device Fingerprinting"],
    ];

    KeywordGroups::new(
        groups
            .iter()
            .map(|members| KeywordGroup::new(members.iter().copied()))
            .collect(),
    )
}

fn default_request_timeout() -> u64 {
    20
}

fn default_max_links() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("link-tally/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_identifier() -> String {
    "link_tally".to_string()
}
