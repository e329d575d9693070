use anyhow::{Context, Result};
use chunkstats::{init_tracing_once, write_report, ChunkStats};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Per-key min/mean/max over a delimited measurement file.
#[derive(Parser)]
#[command(name = "chunkstats")]
#[command(about = "Aggregate key;value lines into per-key min/mean/max", long_about = None)]
struct Cli {
    /// Measurement file to aggregate (lines of key;value)
    #[arg(long, default_value = "data/weather_stations.csv")]
    data_file: PathBuf,

    /// Byte-range chunks to process in parallel (default: one per core)
    #[arg(long)]
    chunks: Option<usize>,

    /// Read-ahead slack past each chunk's nominal end, in bytes
    #[arg(long, default_value_t = 128)]
    slack: usize,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose > 0 && std::env::var_os("RUST_LOG").is_none() {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        std::env::set_var("RUST_LOG", level);
    }
    init_tracing_once();

    let hw = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
    let chunks = cli.chunks.unwrap_or(hw);

    let table = ChunkStats::new()
        .chunk_count(chunks)
        .slack_bytes(cli.slack)
        .progress(!cli.no_progress)
        .progress_label("Aggregating")
        .process_path(&cli.data_file)
        .with_context(|| format!("aggregating {}", cli.data_file.display()))?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_report(&table, &mut out)?;
    out.flush()?;
    Ok(())
}
