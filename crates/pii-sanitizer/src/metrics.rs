//! Thread-safe redaction counters.
//!
//! A [`MetricsRegistry`] is owned by whoever builds it and shared explicitly
//! through an `Arc`; sanitizers built from the same registry count into the
//! same buckets.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::detect::CategoryHit;
use crate::{DetectionCategory, MetricKey};

/// Per-bucket redaction counters.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: [AtomicU64; MetricKey::COUNT],
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one redaction of `category`.
    pub fn increment(&self, category: DetectionCategory) {
        self.add(category.metric_key(), 1);
    }

    pub fn add(&self, key: MetricKey, n: u64) {
        self.counters[key.index()].fetch_add(n, Ordering::Relaxed);
    }

    /// Count every hit of one scrub call.
    pub fn record(&self, hits: &[CategoryHit]) {
        for hit in hits {
            self.increment(hit.category);
        }
    }

    pub fn get(&self, key: MetricKey) -> u64 {
        self.counters[key.index()].load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters.
    ///
    /// Buckets are read one by one; a snapshot taken during concurrent
    /// scrubbing may mix counts from before and after an in-flight call.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            emails_redacted: self.get(MetricKey::Emails),
            phones_redacted: self.get(MetricKey::Phones),
            cards_redacted: self.get(MetricKey::Cards),
            ibans_redacted: self.get(MetricKey::Ibans),
            ips_redacted: self.get(MetricKey::Ips),
            jwts_redacted: self.get(MetricKey::Jwts),
            secrets_redacted: self.get(MetricKey::Secrets),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Counter values at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub emails_redacted: u64,
    pub phones_redacted: u64,
    pub cards_redacted: u64,
    pub ibans_redacted: u64,
    pub ips_redacted: u64,
    pub jwts_redacted: u64,
    pub secrets_redacted: u64,
}

impl MetricsSnapshot {
    pub fn get(&self, key: MetricKey) -> u64 {
        match key {
            MetricKey::Emails => self.emails_redacted,
            MetricKey::Phones => self.phones_redacted,
            MetricKey::Cards => self.cards_redacted,
            MetricKey::Ibans => self.ibans_redacted,
            MetricKey::Ips => self.ips_redacted,
            MetricKey::Jwts => self.jwts_redacted,
            MetricKey::Secrets => self.secrets_redacted,
        }
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        MetricKey::ALL.iter().map(|k| self.get(*k)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}
