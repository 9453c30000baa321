//! Sanitizer facade.
//!
//! The [`Sanitizer`] owns a validated configuration, the detector registry
//! built from it, hashing key material and a handle to its metrics registry.
//! Everything except the metrics is immutable after construction, so one
//! instance can be shared across threads behind an `Arc`.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::detect::{CategoryHit, DetectorRegistry};
use crate::field_policy::{FieldPolicySets, SENSITIVE_HEADERS};
use crate::hash::{KeyMaterial, DEFAULT_KEY_ID};
use crate::mask::REDACTED_PLACEHOLDER;
use crate::structured::{StructuredScrubber, WalkOptions};
use crate::value::{Record, StructuredValue};
use crate::{
    MetricKey, MetricsRegistry, MetricsSnapshot, RedactionStrategy, Result, SanitizerConfig,
};

/// Result of scrubbing one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubOutcome {
    /// The redacted text.
    pub output: String,

    /// Whether anything was replaced.
    pub was_modified: bool,

    /// One entry per redaction, in application order.
    pub hits: Vec<CategoryHit>,
}

impl ScrubOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            output: text.to_string(),
            was_modified: false,
            hits: Vec::new(),
        }
    }
}

/// PII sanitizer.
pub struct Sanitizer {
    config: SanitizerConfig,
    registry: DetectorRegistry,
    fields: FieldPolicySets,
    key: KeyMaterial,
    metrics: Arc<MetricsRegistry>,
}

impl Sanitizer {
    /// Create a sanitizer with a fresh metrics registry.
    ///
    /// Generates a new random key for hashed fields.
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        let key = KeyMaterial::generate(DEFAULT_KEY_ID)?;
        Self::build(config, key, Arc::new(MetricsRegistry::new()))
    }

    /// Create a sanitizer with explicit key material.
    pub fn with_key(config: SanitizerConfig, key: KeyMaterial) -> Result<Self> {
        Self::build(config, key, Arc::new(MetricsRegistry::new()))
    }

    /// Create a sanitizer that counts into a shared metrics registry.
    pub fn with_metrics(config: SanitizerConfig, metrics: Arc<MetricsRegistry>) -> Result<Self> {
        let key = KeyMaterial::generate(DEFAULT_KEY_ID)?;
        Self::build(config, key, metrics)
    }

    /// Load a sanitizer from a config file.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Self::new(SanitizerConfig::load(config_path)?)
    }

    /// Create a sanitizer from every explicit part.
    pub fn build(
        config: SanitizerConfig,
        key: KeyMaterial,
        metrics: Arc<MetricsRegistry>,
    ) -> Result<Self> {
        config.validate()?;

        let disabled: Vec<_> = config.disabled_categories.iter().copied().collect();
        let registry = DetectorRegistry::builtin_except(&disabled);
        let fields = config.field_policy();
        let fingerprint = config.fingerprint()?;

        debug!(
            rules = registry.len(),
            enabled = config.enabled,
            strategy = %config.default_strategy,
            fingerprint = %fingerprint,
            "sanitizer initialized"
        );
        if !config.enabled {
            warn!("sanitizer disabled; values pass through unredacted");
        }

        Ok(Self {
            config,
            registry,
            fields,
            key,
            metrics,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    pub fn key_id(&self) -> &str {
        &self.key.key_id
    }

    /// Redact PII in free text.
    pub fn scrub_text(&self, text: &str) -> String {
        self.scrub_text_report(text).output
    }

    /// Redact PII in free text and report what was replaced.
    pub fn scrub_text_report(&self, text: &str) -> ScrubOutcome {
        if !self.config.enabled {
            return ScrubOutcome::unchanged(text);
        }

        let (output, hits) = self.registry.apply_all(text);
        self.record(&hits);

        ScrubOutcome {
            was_modified: !hits.is_empty(),
            output,
            hits,
        }
    }

    /// Redact a structured record.
    ///
    /// `strategy` applies to sensitive field names and defaults to the
    /// configured one.
    pub fn scrub_dict(&self, record: &Record, strategy: Option<RedactionStrategy>) -> Record {
        if !self.config.enabled {
            return record.clone();
        }

        let strategy = strategy.unwrap_or(self.config.default_strategy);
        let mut hits = Vec::new();
        let out = self.structured().scrub_record(record, strategy, &mut hits);
        self.record(&hits);
        out
    }

    /// Redact any structured value: maps as records, strings as text.
    pub fn scrub_value(
        &self,
        value: &StructuredValue,
        strategy: Option<RedactionStrategy>,
    ) -> StructuredValue {
        match value {
            StructuredValue::Map(map) => StructuredValue::Map(self.scrub_dict(map, strategy)),
            StructuredValue::String(s) => StructuredValue::String(self.scrub_text(s)),
            other => other.clone(),
        }
    }

    /// Redact HTTP header values, keeping order and name casing.
    pub fn scrub_headers(&self, headers: &[(String, String)]) -> Vec<(String, String)> {
        if !self.config.enabled {
            return headers.to_vec();
        }

        headers
            .iter()
            .map(|(name, value)| {
                let value = if SENSITIVE_HEADERS
                    .iter()
                    .any(|h| h.eq_ignore_ascii_case(name))
                {
                    REDACTED_PLACEHOLDER.to_string()
                } else if self.config.is_header_allowlisted(name) {
                    value.clone()
                } else {
                    self.scrub_text(value)
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Snapshot of this sanitizer's counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Handle to the metrics registry, for sharing with other sanitizers.
    pub fn metrics_registry(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    fn structured(&self) -> StructuredScrubber<'_> {
        StructuredScrubber::new(
            &self.registry,
            &self.fields,
            &self.key,
            WalkOptions {
                walk_lists: self.config.walk_lists,
                differentiate_strategies: self.config.differentiate_field_strategies,
                hash_truncation_bytes: self.config.hash_truncation_bytes,
            },
        )
    }

    fn record(&self, hits: &[CategoryHit]) {
        if hits.is_empty() {
            return;
        }
        self.metrics.record(hits);

        if tracing::enabled!(tracing::Level::TRACE) {
            let mut counts = [0u64; MetricKey::COUNT];
            for hit in hits {
                counts[hit.category.metric_key().index()] += 1;
            }
            for key in MetricKey::ALL {
                if counts[key.index()] > 0 {
                    trace!(metric = %key, count = counts[key.index()], "redacted");
                }
            }
        }
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("enabled", &self.config.enabled)
            .field("rules", &self.registry.len())
            .field("key_id", &self.key.key_id)
            .finish()
    }
}
