//! Structured record scrubbing.
//!
//! Walks nested maps, applies field-name policy and hands string leaves to
//! the detector registry. Hits are collected for the caller to count; the
//! walker itself has no side effects.

use crate::detect::{CategoryHit, DetectorRegistry};
use crate::field_policy::{FieldClass, FieldPolicySets};
use crate::hash::KeyMaterial;
use crate::mask::{mask_field_value, REDACTED_PLACEHOLDER};
use crate::value::{Record, StructuredValue};
use crate::RedactionStrategy;

/// Options that change how records are walked.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend into list elements.
    pub walk_lists: bool,
    /// Honor Mask and Hash for sensitive fields instead of treating them as Redact.
    pub differentiate_strategies: bool,
    /// Bytes kept from the HMAC for hashed fields.
    pub hash_truncation_bytes: usize,
}

/// Record walker borrowing everything it needs from a sanitizer.
pub struct StructuredScrubber<'a> {
    registry: &'a DetectorRegistry,
    fields: &'a FieldPolicySets,
    key: &'a KeyMaterial,
    options: WalkOptions,
}

impl<'a> StructuredScrubber<'a> {
    pub fn new(
        registry: &'a DetectorRegistry,
        fields: &'a FieldPolicySets,
        key: &'a KeyMaterial,
        options: WalkOptions,
    ) -> Self {
        Self {
            registry,
            fields,
            key,
            options,
        }
    }

    /// Scrub every field of `record` under `strategy`.
    pub fn scrub_record(
        &self,
        record: &Record,
        strategy: RedactionStrategy,
        hits: &mut Vec<CategoryHit>,
    ) -> Record {
        let mut out = Record::new();

        for (key, value) in record {
            match self.fields.classify(key) {
                FieldClass::Allowlisted => {
                    out.insert(key.clone(), value.clone());
                }
                FieldClass::Sensitive => {
                    if let Some(replacement) = self.redact_field(value, strategy) {
                        out.insert(key.clone(), replacement);
                    }
                }
                FieldClass::Ordinary => {
                    out.insert(key.clone(), self.scrub_value(value, strategy, hits));
                }
            }
        }

        out
    }

    /// Scrub a value found under a non-sensitive key.
    pub fn scrub_value(
        &self,
        value: &StructuredValue,
        strategy: RedactionStrategy,
        hits: &mut Vec<CategoryHit>,
    ) -> StructuredValue {
        match value {
            StructuredValue::Map(map) => StructuredValue::Map(self.scrub_record(map, strategy, hits)),
            StructuredValue::String(s) => {
                let (scrubbed, found) = self.registry.apply_all(s);
                hits.extend(found);
                StructuredValue::String(scrubbed)
            }
            StructuredValue::List(items) if self.options.walk_lists => StructuredValue::List(
                items
                    .iter()
                    .map(|item| self.scrub_value(item, strategy, hits))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Replacement for a sensitive field's value; `None` drops the field.
    fn redact_field(
        &self,
        value: &StructuredValue,
        strategy: RedactionStrategy,
    ) -> Option<StructuredValue> {
        if !strategy.keeps_field() {
            return None;
        }

        if !self.options.differentiate_strategies {
            return Some(REDACTED_PLACEHOLDER.into());
        }

        let replacement = match strategy {
            RedactionStrategy::Mask => mask_field_value(&value.render()),
            RedactionStrategy::Hash => self
                .key
                .hash(&value.render(), self.options.hash_truncation_bytes),
            RedactionStrategy::Redact | RedactionStrategy::Drop => REDACTED_PLACEHOLDER.to_string(),
        };
        Some(replacement.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_policy::{default_set, DEFAULT_ALLOWLIST_FIELDS, DEFAULT_SENSITIVE_FIELDS};
    use serde_json::json;

    struct Fixture {
        registry: DetectorRegistry,
        fields: FieldPolicySets,
        key: KeyMaterial,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: DetectorRegistry::builtin(),
                fields: FieldPolicySets::new(
                    &default_set(DEFAULT_SENSITIVE_FIELDS),
                    &default_set(DEFAULT_ALLOWLIST_FIELDS),
                ),
                key: KeyMaterial::from_bytes([3u8; 32], "k1"),
            }
        }

        fn scrubber(&self, options: WalkOptions) -> StructuredScrubber<'_> {
            StructuredScrubber::new(&self.registry, &self.fields, &self.key, options)
        }
    }

    fn record(value: serde_json::Value) -> Record {
        match StructuredValue::from(value) {
            StructuredValue::Map(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn to_json(record: Record) -> serde_json::Value {
        serde_json::Value::from(StructuredValue::Map(record))
    }

    #[test]
    fn test_drop_strategy_omits_sensitive_fields() {
        let fx = Fixture::new();
        let mut hits = Vec::new();
        let input = record(json!({
            "password": "secret123",
            "api_key": "sk-abc",
            "email": "user@example.com",
            "timestamp": "2024-01-01T00:00:00Z"
        }));

        let out = fx
            .scrubber(WalkOptions::default())
            .scrub_record(&input, RedactionStrategy::Drop, &mut hits);

        assert_eq!(
            to_json(out),
            json!({"email": "u**@example.com", "timestamp": "2024-01-01T00:00:00Z"})
        );
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_non_drop_strategies_narrow_to_redacted() {
        let fx = Fixture::new();
        for strategy in [
            RedactionStrategy::Redact,
            RedactionStrategy::Mask,
            RedactionStrategy::Hash,
        ] {
            let mut hits = Vec::new();
            let out = fx.scrubber(WalkOptions::default()).scrub_record(
                &record(json!({"Token": "abc", "session": 42})),
                strategy,
                &mut hits,
            );
            assert_eq!(
                to_json(out),
                json!({"Token": "[REDACTED]", "session": "[REDACTED]"})
            );
            assert!(hits.is_empty());
        }
    }

    #[test]
    fn test_nested_maps_recurse() {
        let fx = Fixture::new();
        let mut hits = Vec::new();
        let input = record(json!({
            "user": {"contact": {"email": "john@example.com", "phone": "+43 664 1234567"}}
        }));

        let out = fx
            .scrubber(WalkOptions::default())
            .scrub_record(&input, RedactionStrategy::Mask, &mut hits);

        assert_eq!(
            to_json(out),
            json!({"user": {"contact": {"email": "j**@example.com", "phone": "+43*********"}}})
        );
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_allowlisted_value_untouched_even_with_pii() {
        let fx = Fixture::new();
        let mut hits = Vec::new();
        let input = record(json!({"context": "mail admin@example.com"}));
        let out = fx
            .scrubber(WalkOptions::default())
            .scrub_record(&input, RedactionStrategy::Mask, &mut hits);
        assert_eq!(to_json(out), json!({"context": "mail admin@example.com"}));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_lists_and_scalars_pass_by_default() {
        let fx = Fixture::new();
        let mut hits = Vec::new();
        let input = record(json!({
            "recipients": ["a@example.com"],
            "count": 3,
            "ok": true,
            "missing": null
        }));
        let out = fx
            .scrubber(WalkOptions::default())
            .scrub_record(&input, RedactionStrategy::Mask, &mut hits);
        assert_eq!(to_json(out), to_json(input));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_walk_lists() {
        let fx = Fixture::new();
        let mut hits = Vec::new();
        let options = WalkOptions {
            walk_lists: true,
            ..WalkOptions::default()
        };
        let input = record(json!({
            "recipients": ["a@example.com", {"password": "x", "ip": "10.1.2.3"}, [7, "b@example.com"]]
        }));

        let out = fx
            .scrubber(options)
            .scrub_record(&input, RedactionStrategy::Drop, &mut hits);

        assert_eq!(
            to_json(out),
            json!({"recipients": ["a**@example.com", {"ip": "10.1.*.*"}, [7, "b**@example.com"]]})
        );
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_differentiated_mask_and_hash() {
        let fx = Fixture::new();
        let options = WalkOptions {
            differentiate_strategies: true,
            hash_truncation_bytes: 8,
            ..WalkOptions::default()
        };
        let input = record(json!({"password": "secret123", "pass": "abc", "token": 123456}));

        let mut hits = Vec::new();
        let masked = fx
            .scrubber(options)
            .scrub_record(&input, RedactionStrategy::Mask, &mut hits);
        assert_eq!(
            to_json(masked),
            json!({"password": "se*****23", "pass": "***", "token": "12**56"})
        );

        let hashed = fx
            .scrubber(options)
            .scrub_record(&input, RedactionStrategy::Hash, &mut hits);
        let expected = fx.key.hash("secret123", 8);
        assert_eq!(hashed["password"].as_str(), Some(expected.as_str()));
        assert!(hashed["token"].as_str().unwrap().starts_with("[HASH:k1:"));

        let redacted = fx
            .scrubber(options)
            .scrub_record(&input, RedactionStrategy::Redact, &mut hits);
        assert_eq!(redacted["pass"].as_str(), Some("[REDACTED]"));
        assert!(hits.is_empty());
    }
}
