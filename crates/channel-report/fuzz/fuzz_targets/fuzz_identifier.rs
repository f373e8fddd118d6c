//! Fuzz target for identifier parsers.
//!
//! This fuzzer checks that sequence and regex parsers never panic on
//! arbitrary delimiters, indices, patterns and inputs.

#![no_main]

use arbitrary::Arbitrary;
use channel_report::parse::{FieldParser, ParserConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    delimiter: String,
    indices: Vec<i64>,
    pattern: String,
    replacement: Option<String>,
    identifier: String,
}

fuzz_target!(|input: Input| {
    if input.delimiter.is_empty() || input.identifier.len() > 1_000 || input.pattern.len() > 200 {
        return;
    }

    let targets: Vec<serde_json::Value> = input
        .indices
        .iter()
        .map(|i| serde_json::json!({ "index": i }))
        .collect();
    let sequence = ParserConfig::Sequence {
        delimiter: input.delimiter.clone(),
        targets: serde_json::from_value(serde_json::Value::Array(targets)).ok(),
    };
    if let Ok(parser) = sequence.build() {
        let fields = parser.parse(&input.identifier);
        assert!(fields.len() <= input.indices.len());
    }

    let regex: Result<ParserConfig, _> = serde_json::from_value(serde_json::json!({
        "kind": "regex",
        "targets": [{ "pattern": input.pattern, "replacement": input.replacement }]
    }));
    if let Ok(parser) = regex.map_err(|_| ()).and_then(|c| c.build().map_err(|_| ())) {
        let _ = parser.parse(&input.identifier);
    }
});
