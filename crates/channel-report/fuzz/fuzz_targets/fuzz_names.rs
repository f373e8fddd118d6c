//! Fuzz target for taxonomy name parsing.
//!
//! Any name that parses must render back to itself.

#![no_main]

use channel_report::taxonomy::{Column, Granularity, Property};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    if let Ok(column) = name.parse::<Column>() {
        assert_eq!(column.name(), name);
    }
    if let Ok(granularity) = name.parse::<Granularity>() {
        assert_eq!(granularity.as_str(), name);
    }
    if let Ok(property) = name.parse::<Property>() {
        assert_eq!(property.as_str(), name);
    }
});
