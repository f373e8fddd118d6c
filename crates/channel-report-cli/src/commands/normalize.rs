//! Normalize command - translate a channel export into canonical columns.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use channel_report::taxonomy::Granularity;
use channel_report::SourceReader;

use crate::cli::OutputFormat;
use crate::locator::load_config;

pub fn run(
    source: PathBuf,
    config: PathBuf,
    granularities: Vec<Granularity>,
    output: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !source.exists() {
        return Err(format!("Source file not found: {}", source.display()).into());
    }

    let config = load_config(&config)?;
    let (table, metadata) = SourceReader::new().read_file(&source)?;

    println!(
        "{} {} ({} rows, {} columns, {})",
        "Normalizing".cyan().bold(),
        metadata.file.white(),
        metadata.row_count,
        metadata.column_count,
        metadata.format
    );

    let reporter = config.reporter(table.column_names())?;
    let granularities = if granularities.is_empty() {
        reporter.default_granularities()
    } else {
        granularities
    };

    if verbose {
        let names: Vec<String> = granularities.iter().map(|g| g.to_string()).collect();
        println!("  Granularities: {}", names.join(", ").white());
        println!(
            "  Offered columns: {}",
            reporter.list_columns(None, None).len().to_string().white()
        );
    }

    let report = reporter.normalize(&table, &granularities)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        source.with_file_name(format!("{}_canonical.{}", stem, format.extension()))
    });

    let file = File::create(&output_path)
        .map_err(|e| format!("Cannot create {}: {}", output_path.display(), e))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => report.write_csv(writer, b',')?,
        OutputFormat::Tsv => report.write_csv(writer, b'\t')?,
        OutputFormat::Json => serde_json::to_writer_pretty(writer, &report.records())?,
    }

    if report.is_empty() {
        println!(
            "{} No populated columns for this channel; wrote an empty report.",
            "Warning:".yellow().bold()
        );
    }

    println!(
        "{} {} rows x {} columns to {}",
        "Wrote".green().bold(),
        report.row_count().to_string().white().bold(),
        report.column_count().to_string().white().bold(),
        output_path.display().to_string().cyan()
    );
    println!("  Digest: {}", report.digest().dimmed());

    Ok(())
}
