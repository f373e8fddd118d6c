//! channel-report CLI - normalize channel reports into the canonical schema.

mod cli;
mod commands;
mod locator;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Normalize {
            source,
            config,
            granularities,
            output,
            format,
        } => commands::normalize::run(source, config, granularities, output, format, cli.verbose),

        Commands::Columns {
            config,
            granularity,
            category,
        } => commands::columns::run(config, granularity, category),

        Commands::Parse { parser, inputs } => commands::parse::run(parser, inputs),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
