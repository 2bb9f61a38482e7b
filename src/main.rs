//! src/main.rs
use anyhow::Context;
use clap::Parser;
use wordcount::cli::Cli;
use wordcount::configuration::get_configuration;
use wordcount::monitor::BarDisplay;
use wordcount::telemetry::init_tracing;
use wordcount::wordcount::WordCount;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let configuration = get_configuration().context("Failed to read configuration.")?;
    init_tracing(&configuration.log.level)?;

    // One extra thread for the progress monitor.
    let max_threads = configuration.pool.max_threads();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(max_threads + 1)
        .enable_all()
        .build()
        .context("Failed to build the tokio runtime")?;

    let job = WordCount::new(
        cli.source,
        cli.destination,
        cli.chunks as usize,
        configuration,
    );
    let display = BarDisplay::stdout().context("Failed to set up the progress display")?;
    let summary = runtime.block_on(job.run(display))?;

    tracing::info!(
        max_threads = summary.max_threads,
        chunks = summary.chunks,
        elapsed_ms = summary.elapsed_ms(),
        distinct_words = summary.distinct_words,
        total_words = summary.total_words,
        partial_chunks = ?summary.partial_chunks,
        monitor = ?summary.monitor,
        "Word count finished"
    );
    Ok(())
}
