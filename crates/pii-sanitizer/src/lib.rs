//! PII detection and redaction for logs, exports and search results.
//!
//! This crate scans free text and nested records for personal or secret
//! data and replaces it before the data leaves the process.
//!
//! # Key Features
//!
//! - **Ordered detection**: payment cards, emails, phone numbers, IBANs,
//!   bearer tokens, IP addresses and vendor secrets, applied in a fixed
//!   priority order. Card candidates must pass the Luhn checksum.
//! - **Format-preserving masks**: `i**@example.com`, `192.168.*.*`,
//!   `AT61***` keep enough shape for debugging.
//! - **Field policy**: sensitive field names are dropped or redacted,
//!   allowlisted ones pass untouched, everything else is scrubbed by content.
//! - **Metrics**: lock-free per-category counters, shareable across
//!   sanitizers.
//! - **Linear-time matching**: every pattern runs on the `regex` crate, so
//!   hostile input cannot trigger catastrophic backtracking.
//!
//! # Example
//!
//! ```no_run
//! use pii_sanitizer::{RedactionStrategy, Sanitizer, SanitizerConfig, StructuredValue};
//!
//! let sanitizer = Sanitizer::new(SanitizerConfig::default()).unwrap();
//!
//! let text = sanitizer.scrub_text("Contact info@example.com");
//! assert_eq!(text, "Contact i**@example.com");
//!
//! let record = serde_json::json!({"password": "hunter2", "email": "john@example.com"});
//! if let StructuredValue::Map(map) = StructuredValue::from(record) {
//!     let scrubbed = sanitizer.scrub_dict(&map, Some(RedactionStrategy::Drop));
//!     assert!(!scrubbed.contains_key("password"));
//! }
//!
//! assert_eq!(sanitizer.metrics().emails_redacted, 2);
//! ```

pub mod category;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod field_policy;
pub mod hash;
pub mod mask;
pub mod metrics;
pub mod strategy;
pub mod structured;
pub mod validate;
pub mod value;

pub use category::{DetectionCategory, MetricKey};
pub use config::{SanitizerConfig, CONFIG_ENV_VAR, CONFIG_SCHEMA_VERSION};
pub use detect::{CategoryHit, DetectorRegistry, DetectorRule};
pub use engine::{Sanitizer, ScrubOutcome};
pub use error::{Result, SanitizerError};
pub use field_policy::FieldPolicySets;
pub use hash::KeyMaterial;
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use strategy::RedactionStrategy;
pub use validate::luhn_check;
pub use value::{Record, StructuredValue};
