//! CLI entry point for the business listing enrichment workflow.

use anyhow::Result;
use business_enrichment::config::{FILLED_TEMPLATE_FILE_NAME, INPUT_FILE_NAME};
use business_enrichment::{
    DataQualityStats, Enricher, EnrichmentConfig, EnrichmentError, EnrichmentSummary,
};
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Business listing data enrichment",
    long_about = "Completes contact details for a directory of local business listings.\n\n\
                  Each run applies known corrections, writes a manual search list and an\n\
                  update template, merges a filled template when one is present, and saves\n\
                  the updated table with data quality statistics.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  ENRICHMENT_DATA_DIR   Data directory (default: data)\n  \
                  RUST_LOG              Overrides --log-level\n\n\
                  EXAMPLES:\n  \
                  # Run against ./data/businesses_rows.csv\n  \
                  business-enrichment\n\n  \
                  # Shorter search list, custom export\n  \
                  business-enrichment --input export.csv --limit 20"
)]
struct Args {
    /// Directory holding the base dataset and the output folder
    #[arg(long, env = "ENRICHMENT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Path to the base dataset CSV
    ///
    /// Defaults to <data-dir>/businesses_rows.csv
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory receiving every generated file
    ///
    /// Defaults to <data-dir>/output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of businesses in the search list
    #[arg(long, default_value = "50")]
    limit: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    // .env must be loaded before clap reads ENRICHMENT_DATA_DIR
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&args, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;

    info!("{}", "=".repeat(80));
    info!("Business Data Enrichment");
    info!("Input CSV: {}", config.input_path.display());
    info!("Output Directory: {}", config.output_dir.display());
    info!("{}", "=".repeat(80));

    let mut builder = Enricher::builder().config(config);

    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let enricher = builder
        .build()
        .map_err(|e| EnrichmentError::InvalidConfig(e.to_string()))?;
    let summary = enricher.run()?;

    print_statistics(&summary.stats_after);
    print_summary(&summary, enricher.config());

    Ok(())
}

/// Map CLI arguments onto the configuration builder.
fn build_config(args: &Args) -> Result<EnrichmentConfig> {
    let mut builder = EnrichmentConfig::builder()
        .data_dir(&args.data_dir)
        .search_limit(args.limit);

    if let Some(ref input) = args.input {
        builder = builder.input_path(input);
    }

    if let Some(ref output_dir) = args.output_dir {
        builder = builder.output_dir(output_dir);
    }

    builder
        .build()
        .map_err(|e| EnrichmentError::InvalidConfig(e.to_string()).into())
}

/// Print the statistics table.
///
/// Uses `println!` so the table stays visible under `--quiet`.
fn print_statistics(stats: &DataQualityStats) {
    println!();
    println!("DATA QUALITY STATISTICS:");
    println!("{}", "=".repeat(80));
    for (label, value) in stats.display_rows() {
        println!("  {}: {}", label, value);
    }
    println!("{}", "=".repeat(80));
    println!();
}

fn print_summary(summary: &EnrichmentSummary, config: &EnrichmentConfig) {
    println!("{}", "=".repeat(80));
    println!("PROCESS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Run Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!("  Businesses loaded: {}", summary.records_loaded);
    println!("  Corrections applied: {}", summary.corrections_applied);
    match &summary.reconciliation {
        Some(report) => {
            println!("  Template updates applied: {}", report.updated_records());
            if report.unmatched_rows > 0 {
                println!("  Template rows without a matching id: {}", report.unmatched_rows);
            }
        }
        None => println!("  Template updates applied: 0 (no filled template found)"),
    }
    println!(
        "  Website completion: {} -> {}",
        summary.stats_before.website_completion, summary.stats_after.website_completion
    );
    println!();

    println!("All files saved to: {}", config.output_dir.display());
    for path in &summary.artifacts {
        println!("  - {}", path.display());
    }
    println!();

    let search_list = config.search_list_path();
    let template = config.template_path();
    println!("Next Steps:");
    println!("  1. Open: {}", file_name(&search_list));
    println!("  2. Search for each business and fill: {}", file_name(&template));
    println!("  3. Save filled template as: {}", FILLED_TEMPLATE_FILE_NAME);
    println!("  4. Run this tool again to apply updates");
    println!();
    println!(
        "Tip: Focus on the {} businesses in the search list first!",
        summary.search_list_count
    );
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Print the failure with setup guidance when the base dataset is missing.
fn report_failure(args: &Args, e: &anyhow::Error) {
    error!("Enrichment failed: {}", e);

    let input_missing = e
        .downcast_ref::<EnrichmentError>()
        .is_some_and(EnrichmentError::is_input_not_found);

    eprintln!();
    eprintln!("ERROR: {:?}", e);

    if input_missing {
        eprintln!();
        eprintln!("Make sure to:");
        eprintln!(
            "  1. Create a '{}' folder in your project root",
            args.data_dir.display()
        );
        eprintln!("  2. Place '{}' in the data folder", INPUT_FILE_NAME);
        eprintln!("  3. Run this tool from the project root");
    }
    eprintln!();
}
