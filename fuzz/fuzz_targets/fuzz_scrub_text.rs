//! Fuzz target for free-text scrubbing.
//!
//! Scrubbing must never panic and must count exactly what it reports.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pii_sanitizer::{KeyMaterial, Sanitizer, SanitizerConfig};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    enabled: bool,
}

fuzz_target!(|input: Input| {
    let config = SanitizerConfig::default().with_enabled(input.enabled);
    let Ok(sanitizer) = Sanitizer::with_key(config, KeyMaterial::from_bytes([0u8; 32], "fuzz"))
    else {
        return;
    };

    let outcome = sanitizer.scrub_text_report(&input.text);
    assert_eq!(sanitizer.metrics().total(), outcome.hits.len() as u64);

    if !input.enabled {
        assert_eq!(outcome.output, input.text);
    }
});
