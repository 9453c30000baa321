//! Fuzz target for structured record scrubbing.
//!
//! Arbitrary JSON documents are walked with every strategy and both list
//! modes without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pii_sanitizer::{KeyMaterial, RedactionStrategy, Sanitizer, SanitizerConfig, StructuredValue};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<StructuredValue>(data) else {
        return;
    };

    for walk_lists in [false, true] {
        let config = SanitizerConfig::default()
            .with_walk_lists(walk_lists)
            .with_differentiated_strategies(true);
        let Ok(sanitizer) =
            Sanitizer::with_key(config, KeyMaterial::from_bytes([0u8; 32], "fuzz"))
        else {
            return;
        };

        for strategy in [
            RedactionStrategy::Drop,
            RedactionStrategy::Redact,
            RedactionStrategy::Mask,
            RedactionStrategy::Hash,
        ] {
            let _ = sanitizer.scrub_value(&value, Some(strategy));
        }
    }
});
