//! Columns command - list the native columns a channel offers.

use std::path::PathBuf;

use colored::Colorize;
use channel_report::schema::FullSchema;
use channel_report::taxonomy::{Granularity, PropertyCategory};

use crate::locator::load_config;

pub fn run(
    config: PathBuf,
    granularity: Option<Granularity>,
    category: Option<PropertyCategory>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config)?;
    // Without declared columns, list everything the vocabulary offers.
    let offered: Vec<String> = FullSchema::build(&config.vocabulary()?)
        .iter()
        .filter_map(|(_, native)| native.map(str::to_string))
        .collect();
    let reporter = config.reporter(offered)?;

    let granularities: Vec<Granularity> = match granularity {
        Some(g) => vec![g],
        None => Granularity::ALL.to_vec(),
    };

    let title = if config.channel.is_empty() {
        "Channel columns".to_string()
    } else {
        format!("{} columns", config.channel)
    };
    println!("{}", title.cyan().bold());

    let levels = reporter.native_levels();
    let mut total = 0;
    for g in granularities {
        let map = reporter.filtered_map(
            Some(std::slice::from_ref(&g)),
            category.as_ref().map(std::slice::from_ref),
        );
        if map.is_empty() {
            continue;
        }
        let level = levels.get(&g).map(String::as_str).unwrap_or("-");
        println!();
        println!("{} {}", g.to_string().yellow().bold(), format!("({})", level).dimmed());
        for (column, native) in map.iter() {
            println!("  {:<28} {}", column.to_string().white(), native);
        }
        total += map.len();
    }

    println!();
    println!("{} columns", total.to_string().white().bold());
    Ok(())
}
