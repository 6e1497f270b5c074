// main.rs - CLI entry point

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::info;
use xoblocks::cli::validation::{FilterSettings, PeaksSettings, SampleSettings};
use xoblocks::cli::{Config, LogLevel};
use xoblocks::core::ChromosomeStatus;
use xoblocks::output::{write_block_summary, write_raw_table, write_selection};
use xoblocks::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> std::result::Result<(), String> {
    let args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // CLI > config file > environment > built-in defaults
    let args = args.resolve().map_err(|e| e.to_string())?;
    let validation = validate_args(&args).map_err(|e| e.to_string())?;

    init_logging(validation.log);
    let quiet = validation.log == LogLevel::Quiet;
    if let Some(config_path) = &args.config {
        info!("📄 Loaded configuration from: {}", config_path);
    }

    if !quiet {
        println!("🚀 {}", xoblocks::get_info());
    }

    // Configure thread pool
    if let Some(n) = validation.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        if !quiet {
            println!("🧵 Threads: {}", n);
        }
    } else if !quiet {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();
    let outcome = match &validation.task {
        Task::Peaks(settings) => run_peaks(settings, quiet, &command_line),
        Task::Filter(settings) => run_filter(settings, quiet, &command_line),
        Task::Sample(settings) => run_sample(settings, quiet, &command_line),
    };
    outcome.map_err(|e| e.to_string())?;

    if !quiet {
        println!("⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    }
    Ok(())
}

/// Route `tracing` events to stderr, filtered by `--log` unless `RUST_LOG` is set
fn init_logging(level: LogLevel) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn chromosome_progress(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chromosomes ({percent}%) ETA: {eta}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn run_peaks(settings: &PeaksSettings, quiet: bool, command_line: &str) -> Result<()> {
    let table = load_snp_table(&settings.snps, &settings.layout, &settings.coding)?;

    let progress = chromosome_progress(table.chromosomes.len(), quiet);
    let output = run_pipeline(&table, &settings.pipeline, &progress);
    progress.finish_and_clear();

    write_labeled_table(&settings.output, &table.header, &output, command_line)?;
    if let Some(report_path) = &settings.report {
        write_report(report_path, &output.report)?;
    }

    if !quiet {
        let report = &output.report;
        println!("📊 Chromosomes: {}", report.chromosomes.len());
        println!("   ✅ Labeled: {}", report.count(ChromosomeStatus::Labeled));
        println!("   ➖ No blocks: {}", report.count(ChromosomeStatus::NoBlocks));
        println!("   ⚠️  Skipped: {}", report.count(ChromosomeStatus::Skipped));
        for skipped in report.skipped() {
            println!(
                "      {}: {}",
                skipped.chrom_id,
                skipped.reason.as_deref().unwrap_or("unknown")
            );
        }
        println!(
            "🧱 Blocks: {} ({} labeled records) → {}",
            report.total_blocks(),
            report.total_records(),
            settings.output.display()
        );
    }
    Ok(())
}

fn run_filter(settings: &FilterSettings, quiet: bool, command_line: &str) -> Result<()> {
    let table = load_raw_table(&settings.peaks)?;
    let selection = select_blocks(&table, &settings.columns, &settings.criteria)?;

    write_selection(&settings.output, &selection, command_line)?;
    if let Some(summary_path) = &settings.summary {
        write_block_summary(summary_path, &selection.blocks, command_line)?;
    }

    if !quiet {
        println!(
            "🔎 Selected {} blocks ({} of {} records) → {}",
            selection.blocks.len(),
            selection.rows.len(),
            table.len(),
            settings.output.display()
        );
    }
    Ok(())
}

fn run_sample(settings: &SampleSettings, quiet: bool, command_line: &str) -> Result<()> {
    let table = load_raw_table(&settings.snps)?;
    let sample = table.head(settings.size);
    write_raw_table(&settings.output, &sample, command_line)?;

    if !quiet {
        println!(
            "💾 Saved {} records → {}",
            sample.len(),
            settings.output.display()
        );
    }
    Ok(())
}
