//! Fuzz target for cell value inference.
//!
//! This fuzzer checks that:
//! 1. Inference never panics
//! 2. Date truncation never panics and is idempotent

#![no_main]

use channel_report::Value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let value = Value::infer(raw);
    let date = value.truncate_to_date();
    assert_eq!(date.truncate_to_date(), date);
    let _ = value.as_timestamp();
});
