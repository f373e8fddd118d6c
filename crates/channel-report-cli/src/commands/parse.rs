//! Parse command - split identifier strings into labelled fields.

use std::path::PathBuf;

use channel_report::parse::ParserConfig;

use crate::locator::load_json;

pub fn run(parser: PathBuf, inputs: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config: ParserConfig = serde_json::from_value(load_json(&parser)?)?;
    let parser = config.build()?;

    let results: Vec<serde_json::Value> = inputs
        .iter()
        .map(|input| {
            serde_json::json!({
                "input": input,
                "fields": parser.parse(input),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
