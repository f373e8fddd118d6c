//! Example: Normalize a channel export against a channel config.
//!
//! Usage:
//!   cargo run --example normalize -- <source_file> <config.json>
//!
//! Example:
//!   cargo run --example normalize -- exports/search_daily.csv configs/search.json

use std::env;
use std::io;
use std::path::Path;

use channel_report::{ChannelConfig, SourceReader};

fn main() -> channel_report::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example normalize -- <source_file> <config.json>");
        std::process::exit(1);
    }

    let source_path = Path::new(&args[1]);
    if !source_path.exists() {
        eprintln!("Error: File not found: {}", args[1]);
        std::process::exit(1);
    }

    let config = ChannelConfig::load(&args[2])?;
    let (table, metadata) = SourceReader::new().read_file(source_path)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Normalizing: {}", metadata.file);
    println!("{}", separator);
    println!("  Format: {}", metadata.format);
    println!("  Rows: {}", metadata.row_count);
    println!("  Columns: {}", metadata.column_count);
    println!();

    let reporter = config.reporter(table.column_names())?;
    for (granularity, level) in reporter.native_levels() {
        println!("  {} -> {}", granularity, level);
    }

    let granularities = reporter.default_granularities();
    let report = reporter.normalize(&table, &granularities)?;

    println!();
    println!(
        "## Canonical report ({} rows x {} columns)",
        report.row_count(),
        report.column_count()
    );
    report.write_csv(io::stdout().lock(), b',')?;
    println!();
    println!("Digest: {}", report.digest());

    Ok(())
}
