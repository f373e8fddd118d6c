//! Fuzz target for the source reader and the normalize pipeline.
//!
//! This fuzzer checks that:
//! 1. Reading never panics on malformed input
//! 2. Normalizing whatever parsed never panics

#![no_main]

use channel_report::schema::CanonicalVocabulary;
use channel_report::{ChannelReporter, SourceReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = SourceReader::new().read_str(text) else {
        return;
    };

    // Canonical names: every header that happens to be a property name maps.
    let reporter = ChannelReporter::new(CanonicalVocabulary, table.column_names());
    let _ = reporter.normalize(&table, &reporter.default_granularities());
});
