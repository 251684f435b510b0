//! Run statistics
//!
//! This module summarizes a crawl report for display at the end of a run.

use crate::crawler::CrawlReport;
use chrono::{DateTime, Local};

/// Run statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// Total number of links discovered across all seeds
    pub total_links: usize,

    /// Links that answered with HTTP 200
    pub valid_links: usize,

    /// Links with any other status or no answer
    pub invalid_links: usize,

    /// Keyword hits per seed, in crawl order
    pub keyword_totals: Vec<(String, u64)>,

    /// When the statistics were computed
    pub finished_at: DateTime<Local>,
}

impl RunStatistics {
    /// Share of discovered links that were valid, in percent
    pub fn valid_percentage(&self) -> f64 {
        if self.total_links > 0 {
            (self.valid_links as f64 / self.total_links as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Sum of keyword hits over all seeds
    pub fn total_keyword_hits(&self) -> u64 {
        self.keyword_totals.iter().map(|(_, hits)| hits).sum()
    }
}

/// Computes statistics from a crawl report
pub fn compute_statistics(report: &CrawlReport) -> RunStatistics {
    let valid_links = report.valid_count();

    RunStatistics {
        total_links: report.links.len(),
        valid_links,
        invalid_links: report.links.len() - valid_links,
        keyword_totals: report
            .seeds
            .iter()
            .map(|seed| (seed.seed.clone(), seed.tally.total()))
            .collect(),
        finished_at: Local::now(),
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Run Statistics ===\n");
    println!("Finished: {}", stats.finished_at.format("%Y-%m-%d %H:%M:%S"));
    println!();

    println!("Links:");
    println!("  Total links found: {}", stats.total_links);
    println!(
        "  Valid: {} ({:.1}%)",
        stats.valid_links,
        stats.valid_percentage()
    );
    println!("  Invalid: {}", stats.invalid_links);
    println!();

    println!("Keyword Hits by Seed:");
    let mut totals: Vec<_> = stats.keyword_totals.iter().collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    for (seed, hits) in totals {
        println!("  {}: {}", seed, hits);
    }
    println!();

    println!("Total keyword hits: {}", stats.total_keyword_hits());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::{KeywordGroup, KeywordTally, LinkRecord, SeedTally};

    #[test]
    fn test_compute_statistics() {
        let mut tally = KeywordTally::new();
        tally.add(KeywordGroup::new(["Balkans"]), 4);
        tally.add(KeywordGroup::new(["OFAC", "Sanctions"]), 2);

        let report = CrawlReport {
            links: vec![
                LinkRecord::new("https://a.example/", "https://x.example/", Some(200)),
                LinkRecord::new("https://a.example/", "https://y.example/", Some(403)),
                LinkRecord::new("https://b.example/", "https://z.example/", None),
            ],
            seeds: vec![
                SeedTally {
                    seed: "https://a.example/".to_string(),
                    tally,
                },
                SeedTally {
                    seed: "https://b.example/".to_string(),
                    tally: KeywordTally::new(),
                },
            ],
        };

        let before = Local::now();
        let stats = compute_statistics(&report);
        assert!(stats.finished_at >= before);
        assert_eq!(stats.total_links, 3);
        assert_eq!(stats.valid_links, 1);
        assert_eq!(stats.invalid_links, 2);
        assert_eq!(
            stats.keyword_totals,
            vec![
                ("https://a.example/".to_string(), 6),
                ("https://b.example/".to_string(), 0),
            ]
        );
        assert_eq!(stats.total_keyword_hits(), 6);
    }

    #[test]
    fn test_valid_percentage_of_empty_run() {
        let stats = compute_statistics(&CrawlReport::default());
        assert_eq!(stats.total_links, 0);
        assert_eq!(stats.valid_percentage(), 0.0);
    }
}
