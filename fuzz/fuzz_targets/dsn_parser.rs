//! Fuzz target for the DSN parser.
//!
//! This target feeds arbitrary byte sequences to the scanner to find
//! crashes and panics; the grammar should only ever return errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_dsn_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use marlin_dsn::parse_dsn;

fuzz_target!(|data: &[u8]| {
    let mut sink = |_: &str, _: Option<&str>| true;

    // Parsing must never panic, with or without an explicit length.
    let _ = parse_dsn(data, None, &mut sink);
    let _ = parse_dsn(data, Some(data.len()), &mut sink);

    // An oversized length must be capped, not trusted.
    let _ = parse_dsn(data, Some(data.len().saturating_add(64)), &mut sink);
});
