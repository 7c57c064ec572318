//! Labelstats - conversation labeling statistics.
//!
//! A CLI tool that aggregates labeled-conversation spreadsheets into a
//! comprehensive statistics report plus a dashboard dataset, and merges
//! free-text report documents into a previously produced report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, document, or prior-report failure)

mod analysis;
mod cli;
mod config;
mod document;
mod models;
mod report;
mod sheets;

use analysis::{merge, process_source, RunTotals, SheetOutcome};
use anyhow::{Context, Result};
use chrono::Local;
use cli::{Args, Command};
use config::Config;
use document::parser::DocumentParser;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Labelstats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Run failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .labelstats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".labelstats.toml");

    if path.exists() {
        eprintln!("⚠️  .labelstats.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .labelstats.toml")?;

    println!("✅ Created .labelstats.toml with default settings.");
    println!("   Edit it to customize sources, sheets, and artifact names.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected job.
fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.out_dir.display()))?;

    match &args.command {
        Command::Aggregate => run_aggregate(args, &config),
        Command::Merge { document, report } => {
            run_merge(args, &config, document, report.as_deref())
        }
        // Handled before logging init.
        Command::InitConfig => Ok(()),
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .labelstats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Run the aggregation job over every configured source.
fn run_aggregate(args: &Args, config: &Config) -> Result<()> {
    println!("🔍 Analyzing comprehensive labeling statistics...");
    println!("\n📊 Processing files and sheets:");

    let mut totals = RunTotals::default();

    for descriptor in &config.sources {
        println!("\n📁 File: {}", descriptor.file.display());
        let outcome = process_source(descriptor);

        for sheet in &outcome.sheets {
            match sheet {
                SheetOutcome::Loaded { name, summary } => {
                    println!("  📋 Sheet: {}", name);
                    println!("    ✅ Found {} conversations", summary.rows);
                }
                SheetOutcome::Missing { name } => {
                    println!(
                        "  ❌ Sheet '{}' not found in {}",
                        name,
                        descriptor.file.display()
                    );
                }
            }
        }
        if let Some(failure) = &outcome.failure {
            warn!("Skipping rest of {}: {}", descriptor.file.display(), failure);
            println!("  ❌ {}", failure);
        }

        totals.absorb_source(&outcome);
    }

    let processed_date = Local::now().format("%Y-%m-%d").to_string();
    let stats = totals.into_report(config.sources.len() as u64, processed_date);

    println!("\n{}", report::render_summary(&stats));

    let report_path = args.out_dir.join(&config.output.report);
    report::write_json(&stats, &report_path)?;
    info!("Report written to {}", report_path.display());
    println!("\n💾 Detailed statistics saved to '{}'", report_path.display());

    let dashboard = report::derive_dashboard(&stats);
    let dashboard_path = args.out_dir.join(&config.output.dashboard);
    report::write_json(&dashboard, &dashboard_path)?;
    println!("🎯 Dashboard data saved to '{}'", dashboard_path.display());

    Ok(())
}

/// Run the document extraction and merge job.
fn run_merge(
    args: &Args,
    config: &Config,
    document_path: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    println!("📄 Extracting report document: {}", document_path.display());

    let paragraphs = document::read_paragraphs(document_path)?;
    let parser = DocumentParser::new();
    let extracted = parser.parse(&paragraphs);

    for (date, count) in &extracted.overview.dates {
        println!("   📅 {}: {} conversations", date, count);
    }
    for (case, count) in &extracted.case_statistics {
        debug!("{} -> {}", case, count);
    }
    println!(
        "   📊 Total conversations: {}",
        extracted.overview.total_conversations
    );
    println!("   📋 Case totals: {}", extracted.overview.total_cases);

    let base_path = report_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| args.out_dir.join(&config.output.report));

    println!("\n🔄 Updating comprehensive statistics...");
    let mut stats = report::load_report(&base_path)
        .context("Run the aggregate job first to produce the base report")?;

    merge::merge_document(&mut stats, &extracted);

    let updated_path = args.out_dir.join(&config.output.updated_report);
    report::write_json(&stats, &updated_path)?;
    println!(
        "✅ Updated statistics saved to '{}'",
        updated_path.display()
    );
    println!(
        "📊 New total conversations: {}",
        stats.overview.total_conversations
    );
    println!(
        "📁 Total files processed: {}",
        stats.overview.total_files_processed
    );

    let dashboard = report::derive_dashboard(&stats);
    let dashboard_path = args.out_dir.join(&config.output.updated_dashboard);
    report::write_json(&dashboard, &dashboard_path)?;
    println!(
        "🎯 Updated dashboard data saved to '{}'",
        dashboard_path.display()
    );

    Ok(())
}
