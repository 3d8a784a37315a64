//! Resolve a file of queries in parallel.
//!
//! Usage: batch-resolve <jobs.json> <results.json> [--workers N] [--log-only]
//!
//! Input is a JSON array of `{"query": "...", "candidates": [provider records]}`.

use anyhow::{Context, Result};
use clap::Parser;
use song_match::batch::{resolve_batch, BatchStats, Job};
use song_match::config::ConfigArgs;
use song_match::logging::init_tracing;
use song_match::progress::{format_duration, Phase, Reporter};
use song_match::safety::validate_output_path;
use song_match::Resolver;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "batch-resolve")]
#[command(about = "Resolve many song queries against their provider results")]
struct Args {
    input: PathBuf,

    output: PathBuf,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide progress bars and log periodic progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Also write summary stats as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Jobs between progress lines in log-only mode
    #[arg(long, default_value = "1000")]
    log_interval: u64,

    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    tuning: ConfigArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let reporter = Reporter::new(args.log_only, args.log_interval);

    let mut sources = vec![args.input.as_path()];
    validate_output_path(&args.output, &sources)?;
    if let Some(stats_path) = &args.stats {
        sources.push(args.output.as_path());
        validate_output_path(stats_path, &sources)?;
    }

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let config = args.tuning.load().context("Invalid resolver configuration")?;
    let resolver = Resolver::new(config);
    let start = Instant::now();

    let spinner = reporter.start(Phase::Reading, None);
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}", args.input))?;
    let jobs: Vec<Job> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse jobs from {:?}", args.input))?;
    spinner.finish_and_clear();
    info!("Loaded {} jobs from {:?}", jobs.len(), args.input);

    let outcomes = resolve_batch(&resolver, &jobs, &reporter);
    info!("Resolved {} jobs in {}", outcomes.len(), format_duration(start.elapsed()));

    let spinner = reporter.start(Phase::Writing, None);
    let json = serde_json::to_string_pretty(&outcomes)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {:?}", args.output))?;
    spinner.finish_and_clear();

    let stats = BatchStats::from_outcomes(&outcomes);
    if let Some(stats_path) = &args.stats {
        std::fs::write(stats_path, serde_json::to_string_pretty(&stats)?)
            .with_context(|| format!("Failed to write {:?}", stats_path))?;
    }

    println!("\n{:=<60}", "");
    println!("Batch complete!");
    println!("  Queries:      {}", stats.total);
    println!("  Single match: {}", stats.single_match);
    println!("  Shortlist:    {}", stats.shortlist);
    for (reason, count) in stats.sorted_reasons() {
        println!("    {:<26} {}", reason, count);
    }
    println!("  No match:     {}", stats.no_match);
    println!("  Errors:       {}", stats.errors);
    println!("  Elapsed:      {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    Ok(())
}
