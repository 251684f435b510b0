//! Link-Tally main entry point
//!
//! This is the command-line interface for the Link-Tally crawler.

use anyhow::Context;
use clap::Parser;
use link_tally::config::{load_config_with_hash, validate, Config, OutputConfig, PipelineMode};
use link_tally::crawler::run_pipeline;
use link_tally::logging::{init_logging, prepare_directories};
use link_tally::output::{
    compute_statistics, print_statistics, write_chart, write_keyword_csv, write_link_csv,
    BarChart, OutputResult,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::Instrument;

/// Process exit code for any failed run
const FAILURE_EXIT_CODE: u8 = 103;

/// Link-Tally: link health and keyword incidence crawler
///
/// Link-Tally fetches a list of seed pages, checks the outbound links found on
/// each one, counts keyword-group hits on the pages that respond, and writes
/// CSV tables and HTML bar charts of the results.
#[derive(Parser, Debug)]
#[command(name = "link-tally")]
#[command(version)]
#[command(about = "Link health and keyword incidence crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in seeds and keywords when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Pipeline variant, overriding the configuration file
    #[arg(short, long, value_enum)]
    mode: Option<PipelineMode>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

/// Logs a failed run, falling back to stderr when logging never came up
fn report_failure(error: &anyhow::Error) {
    if tracing::dispatcher::has_been_set() {
        tracing::error!("Critical error occurred: {:#}", error);
        tracing::error!("Execution failed");
    } else {
        eprintln!("Critical error occurred: {:#}", error);
        eprintln!("Execution failed");
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => {
            let config = Config::default();
            validate(&config).context("Built-in configuration is invalid")?;
            (config, None)
        }
    };

    if let Some(mode) = cli.mode {
        config.crawler.mode = mode;
    }

    let created = prepare_directories(&config.output).context("Failed to create directories")?;
    init_logging(cli.verbose, cli.quiet, &config.output).context("Failed to initialize logging")?;

    for dir in &created {
        tracing::info!("Created directory: {}", dir.display());
    }
    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using built-in seeds and keyword groups"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let span = tracing::info_span!("run", id = %config.output.log_identifier);
    handle_run(&config, cli.quiet).instrument(span).await
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Link-Tally Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Mode: {}", config.crawler.mode);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Max links per seed: {}", config.crawler.max_links_per_seed);
    match config.crawler.max_concurrent_requests {
        0 => println!("  Max concurrent requests: unlimited"),
        n => println!("  Max concurrent requests: {}", n),
    }
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nOutput:");
    println!("  Link CSV: {}", config.output.link_csv_path().display());
    println!("  Keyword CSV: {}", config.output.keyword_csv_path().display());
    println!("  Link chart: {}", config.output.link_chart_path().display());
    println!("  Keyword chart: {}", config.output.keyword_chart_path().display());
    println!("  Log file: {}", config.output.log_file_path().display());

    let groups = config.effective_groups();
    println!(
        "\nKeyword Groups ({}, {}):",
        groups.len(),
        config.keywords.match_mode
    );
    for group in groups.iter() {
        println!("  - {}", group);
    }

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would check up to {} links", link_budget(config));
}

/// Upper bound on the number of links a run checks
fn link_budget(config: &Config) -> usize {
    config
        .seeds
        .len()
        .saturating_mul(config.crawler.max_links_per_seed)
}

/// Handles the main run: crawl, then write tables and charts
///
/// Each stage logs its own failure before the error is propagated.
async fn handle_run(config: &Config, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    tracing::info!("Starting execution");

    let report = stage(
        "Error processing links and keywords",
        run_pipeline(config).await,
    )?;

    stage(
        "Error saving valid links to CSV",
        write_link_csv(&report.links, &config.output.link_csv_path()),
    )?;
    let link_chart = BarChart::link_status(&report.links);

    stage(
        "Error saving keyword frequencies to CSV",
        write_keyword_csv(&report.seeds, &config.output.keyword_csv_path()),
    )?;
    let keyword_chart = BarChart::keyword_frequency(&report.seeds);

    stage(
        "Error saving graphs to HTML",
        save_charts(&link_chart, &keyword_chart, &config.output),
    )?;

    if !quiet {
        print_statistics(&compute_statistics(&report));
    }

    tracing::info!(
        "Execution completed successfully in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Logs a failed stage and attaches the stage name to the error
fn stage<T, E>(name: &'static str, result: Result<T, E>) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(|e| {
        tracing::error!("{}: {}", name, e);
        anyhow::Error::new(e).context(name)
    })
}

fn save_charts(
    link_chart: &BarChart,
    keyword_chart: &BarChart,
    output: &OutputConfig,
) -> OutputResult<()> {
    tracing::info!("Saving graphs to HTML...");

    let link_path = output.link_chart_path();
    let keyword_path = output.keyword_chart_path();
    write_chart(link_chart, &link_path)?;
    write_chart(keyword_chart, &keyword_path)?;

    tracing::info!(
        "Graphs saved to {} and {}",
        link_path.display(),
        keyword_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_budget() {
        let mut config = Config::default();
        config.crawler.max_links_per_seed = 10;
        assert_eq!(link_budget(&config), config.seeds.len() * 10);

        config.crawler.max_links_per_seed = usize::MAX;
        assert_eq!(link_budget(&config), usize::MAX);
    }

    #[test]
    fn test_stage_names_the_failed_step() {
        let failed: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only directory",
        ));

        let error = stage("Error saving valid links to CSV", failed).unwrap_err();
        let rendered = format!("{:#}", error);
        assert!(rendered.starts_with("Error saving valid links to CSV"));
        assert!(rendered.contains("read-only directory"));
    }

    #[test]
    fn test_stage_passes_success_through() {
        let value = stage("unused", Ok::<_, std::io::Error>(7)).unwrap();
        assert_eq!(value, 7);
    }
}
