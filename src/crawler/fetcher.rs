//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with a fixed timeout and user agent
//! - GET requests that record the status code of a link
//! - GET requests that return a seed page body
//!
//! There is no retry. A transport failure is reported once and the caller
//! decides what neutral value to substitute.

use crate::config::CrawlerConfig;
use crate::TallyError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of checking a single link
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered
    Status {
        /// HTTP status code
        status_code: u16,
        /// Page body, read only for a 200 response
        body: Option<String>,
    },

    /// No HTTP response was received (timeout, DNS, connection refused, TLS)
    Unreachable {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// The HTTP status code, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            Self::Unreachable { .. } => None,
        }
    }
}

/// Builds the HTTP client shared by every request of a run
///
/// Redirects are followed with reqwest's default policy, so the recorded
/// status is the one of the final response.
///
/// # Example
///
/// ```no_run
/// use link_tally::config::CrawlerConfig;
/// use link_tally::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a link and records its status
///
/// The body is only downloaded when the status is exactly 200, since only
/// those pages are scanned for keywords. A failure while reading that body
/// is logged and reported as a 200 without a body.
pub async fn fetch_status(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Unreachable {
                error: describe_error(&e),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchOutcome::Status {
            status_code: status.as_u16(),
            body: None,
        };
    }

    let body = match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            None
        }
    };

    FetchOutcome::Status {
        status_code: status.as_u16(),
        body,
    }
}

/// Fetches a page body regardless of its status code
///
/// Seed pages are parsed even when the server answers with an error page.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, TallyError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| TallyError::Http {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!("{} answered with HTTP {}", url, response.status().as_u16());

    response.text().await.map_err(|source| TallyError::Http {
        url: url.to_string(),
        source,
    })
}

/// Classifies a transport error into a short description
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else if error.is_redirect() {
        format!("Redirect error: {}", error)
    } else {
        error.to_string()
    }
}
