use crate::config::types::{Config, CrawlerConfig, KeywordConfig, OutputConfig};
use crate::ConfigError;
use std::collections::HashSet;
use tokio::sync::Semaphore;
use url::Url;

/// Largest accepted per-request timeout (one hour)
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3_600;

/// Largest accepted number of links kept from one seed page
pub const MAX_LINKS_PER_SEED: usize = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_crawler_config(&config.crawler)?;
    validate_keyword_config(&config.keywords)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the seed list: non-empty, absolute http(s) URLs, no duplicates
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use the http or https scheme",
                seed
            )));
        }

        if !seen.insert(seed.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' is listed more than once",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be <= {}, got {}",
            MAX_REQUEST_TIMEOUT_SECS, config.request_timeout_secs
        )));
    }

    if config.max_links_per_seed < 1 || config.max_links_per_seed > MAX_LINKS_PER_SEED {
        return Err(ConfigError::Validation(format!(
            "max_links_per_seed must be between 1 and {}, got {}",
            MAX_LINKS_PER_SEED, config.max_links_per_seed
        )));
    }

    if config.max_concurrent_requests > Semaphore::MAX_PERMITS {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be <= {}, got {}",
            Semaphore::MAX_PERMITS,
            config.max_concurrent_requests
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates keyword groups: at least one group, no empty group or keyword
fn validate_keyword_config(config: &KeywordConfig) -> Result<(), ConfigError> {
    if config.groups.is_empty() {
        return Err(ConfigError::Validation(
            "at least one keyword group is required".to_string(),
        ));
    }

    for (index, group) in config.groups.iter().enumerate() {
        if group.keywords().is_empty() {
            return Err(ConfigError::Validation(format!(
                "keyword group #{} is empty",
                index + 1
            )));
        }

        if group.keywords().iter().any(|keyword| keyword.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword group #{} ({}) contains an empty keyword",
                index + 1,
                group
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.logs_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "logs_dir cannot be empty".to_string(),
        ));
    }

    let identifier = &config.log_identifier;
    if identifier.is_empty()
        || !identifier
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "log_identifier must be non-empty and contain only alphanumeric characters, '-' or '_', got '{}'",
            identifier
        )));
    }

    Ok(())
}
