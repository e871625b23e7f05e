//! Fuzz target for DSN application to a client handle.
//!
//! Exercises the parser and the option applier together: arbitrary input
//! may fail to parse, but it must never panic or corrupt the handle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use marlin_client::ClientHandle;

fuzz_target!(|data: &[u8]| {
    let mut handle = ClientHandle::new();
    if let Err(err) = handle.apply_dsn(data, None) {
        // The recorded error carries the same offset as the return.
        let recorded = handle.last_error().expect("error recorded on handle");
        assert_eq!(recorded.dsn_offset(), err.dsn_offset());
    }
});
