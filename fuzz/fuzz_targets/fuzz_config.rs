//! Fuzz target for sanitizer config parsing.
//!
//! Tests that JSON config parsing and validation handle arbitrary input
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pii_sanitizer::SanitizerConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must also be accepted by the sanitizer itself
    if let Ok(config) = SanitizerConfig::from_json(text) {
        assert!(config.fingerprint().is_ok());
        assert!(pii_sanitizer::Sanitizer::new(config).is_ok());
    }
});
