//! Sheria main entry point
//!
//! Command-line interface for the legal-records scraper.

use clap::{Parser, Subcommand};
use sheria::config::load_config_with_hash;
use sheria::fetch::FetchEngine;
use sheria::index::{HttpSearchIndex, SearchIndex};
use sheria::pipeline::{run_analysis, run_cases, run_legislation};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Sheria: a resilient legal-records scraper
///
/// Fetches case law, legislation listings and full judgment text from a
/// public legal-records website (with a fallback mirror) and writes
/// structured CSV/JSON records, optionally feeding a search index.
#[derive(Parser, Debug)]
#[command(name = "sheria")]
#[command(version = "1.0.0")]
#[command(about = "A resilient legal-records scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract recent case law with shallow metadata (CSV output)
    CaseExtraction {
        /// Number of cases to extract
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Output file (default: auto-generated under the output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build the legislation database (JSON output)
    Legislation {
        /// Minimum number of Acts to extract
        #[arg(long = "min-acts", default_value_t = 50)]
        min_acts: usize,

        /// Output file (default: auto-generated under the output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Analyze full judgment text into structured fields (JSON output)
    CaseAnalysis {
        /// Number of cases to analyze
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Specific case URLs to analyze instead of walking the listing
        #[arg(long, num_args = 0..)]
        urls: Vec<String>,

        /// Output file (default: auto-generated under the output directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run all three pipelines in sequence
    All {
        /// Number of cases for extraction and analysis
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Minimum number of Acts for the legislation pipeline
        #[arg(long = "min-acts", default_value_t = 50)]
        min_acts: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    // One engine per process: pooled connections, explicit teardown
    let engine = Arc::new(FetchEngine::new(
        config.fetch.clone(),
        config.sites.clone(),
    )?);

    let index: Option<Box<dyn SearchIndex>> = match &config.index {
        Some(index_config) => {
            tracing::info!("Search index enabled at {}", index_config.base_url);
            Some(Box::new(HttpSearchIndex::new(index_config)?))
        }
        None => None,
    };
    let index_ref = index.as_deref();

    match cli.command {
        Command::CaseExtraction { count, output } => {
            let run = run_cases(Arc::clone(&engine), &config, index_ref, count, output).await?;
            println!("Case extraction: {}", run.report);
            if let Some(path) = &run.output_path {
                println!("Output: {}", path.display());
            }
        }

        Command::Legislation { min_acts, output } => {
            let run =
                run_legislation(Arc::clone(&engine), &config, index_ref, min_acts, output).await?;
            println!("Legislation: {} ({} Acts)", run.report, run.records.len());
            if let Some(path) = &run.output_path {
                println!("Output: {}", path.display());
            }
        }

        Command::CaseAnalysis {
            count,
            urls,
            output,
        } => {
            let urls = (!urls.is_empty()).then_some(urls);
            let run =
                run_analysis(Arc::clone(&engine), &config, index_ref, count, urls, output).await?;
            println!("Case analysis: {}", run.report);
            if let Some(path) = &run.output_path {
                println!("Output: {}", path.display());
            }
        }

        Command::All { count, min_acts } => {
            let cases =
                run_cases(Arc::clone(&engine), &config, index_ref, count, None).await?;
            println!("Case extraction: {}", cases.report);

            let legislation =
                run_legislation(Arc::clone(&engine), &config, index_ref, min_acts, None).await?;
            println!("Legislation: {}", legislation.report);

            // Reuse the URLs the extraction run already resolved
            let urls = (!cases.records.is_empty()).then(|| {
                cases
                    .records
                    .iter()
                    .map(|record| record.source_url.clone())
                    .collect::<Vec<_>>()
            });
            let analysis =
                run_analysis(Arc::clone(&engine), &config, index_ref, count, urls, None).await?;
            println!("Case analysis: {}", analysis.report);

            println!(
                "All pipelines complete: {} cases, {} Acts, {} analyses",
                cases.records.len(),
                legislation.records.len(),
                analysis.records.len()
            );
        }
    }

    // All pipeline tasks have joined; the engine is ours to close
    if let Ok(engine) = Arc::try_unwrap(engine) {
        engine.close();
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sheria=info,warn"),
            1 => EnvFilter::new("sheria=debug,info"),
            2 => EnvFilter::new("sheria=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
