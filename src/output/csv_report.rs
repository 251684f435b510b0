//! CSV tables of link validity and keyword frequency

use crate::crawler::{LinkRecord, SeedTally};
use crate::output::OutputResult;
use std::path::Path;

const LINK_HEADER: [&str; 3] = ["Parent URL", "Href Link", "Status"];
const KEYWORD_HEADER: [&str; 3] = ["Parent URL", "Keyword Set", "Frequency"];

/// Writes one row per discovered link
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written (excluding the header)
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_link_csv(records: &[LinkRecord], path: &Path) -> OutputResult<usize> {
    tracing::info!("Saving valid links to CSV...");

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(LINK_HEADER)?;
    for record in records {
        writer.write_record([
            record.parent.as_str(),
            record.link.as_str(),
            record.status.as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Valid links saved to {}", path.display());
    Ok(records.len())
}

/// Writes one row per (seed, keyword group) with a positive count
///
/// Seeds keep their crawl order; groups within a seed are ordered by their
/// keywords. The keyword set column joins the group members with `", "`.
pub fn write_keyword_csv(tallies: &[SeedTally], path: &Path) -> OutputResult<usize> {
    tracing::info!("Saving keyword frequencies to CSV...");

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(KEYWORD_HEADER)?;

    let mut rows = 0;
    for seed in tallies {
        for (group, hits) in seed.tally.iter() {
            writer.write_record([seed.seed.clone(), group.to_string(), hits.to_string()])?;
            rows += 1;
        }
    }
    writer.flush()?;

    tracing::info!("Keyword frequencies saved to {}", path.display());
    Ok(rows)
}
