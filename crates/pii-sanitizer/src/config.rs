//! Sanitizer configuration.
//!
//! A JSON document with serde defaults for every field, so an empty object
//! is a complete configuration. Unknown fields are rejected rather than
//! silently ignored: a misspelt `sensitive_fileds` must not leave passwords
//! unredacted.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::field_policy::{
    default_set, normalize_field_name, FieldPolicySets, DEFAULT_ALLOWLIST_FIELDS,
    DEFAULT_HEADER_ALLOWLIST, DEFAULT_SENSITIVE_FIELDS, SENSITIVE_HEADERS,
};
use crate::hash::{DEFAULT_TRUNCATION_BYTES, MAX_TRUNCATION_BYTES, MIN_TRUNCATION_BYTES};
use crate::{DetectionCategory, RedactionStrategy, Result, SanitizerError};

/// Schema version for the config file.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";

/// Environment variable naming a config file for [`SanitizerConfig::resolve`].
pub const CONFIG_ENV_VAR: &str = "PII_SANITIZER_CONFIG";

/// Sanitizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SanitizerConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// When false every scrub operation is the identity.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Strategy for sensitive fields when the caller passes none.
    #[serde(default)]
    pub default_strategy: RedactionStrategy,

    /// Field names whose values are redacted regardless of content.
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: BTreeSet<String>,

    /// Field names whose values are never touched.
    #[serde(default = "default_allowlist_fields")]
    pub allowlist_fields: BTreeSet<String>,

    /// Header names passed through by header scrubbing.
    #[serde(default = "default_header_allowlist")]
    pub header_allowlist: BTreeSet<String>,

    /// Categories whose rules are left out of the registry.
    #[serde(default)]
    pub disabled_categories: BTreeSet<DetectionCategory>,

    /// Walk list elements in structured records.
    #[serde(default)]
    pub walk_lists: bool,

    /// Apply Mask and Hash to sensitive fields instead of treating them as Redact.
    #[serde(default)]
    pub differentiate_field_strategies: bool,

    /// Hash truncation bytes (default 8 = 16 hex chars).
    #[serde(default = "default_truncation_bytes")]
    pub hash_truncation_bytes: usize,
}

fn default_schema_version() -> String {
    CONFIG_SCHEMA_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

fn default_sensitive_fields() -> BTreeSet<String> {
    default_set(DEFAULT_SENSITIVE_FIELDS)
}

fn default_allowlist_fields() -> BTreeSet<String> {
    default_set(DEFAULT_ALLOWLIST_FIELDS)
}

fn default_header_allowlist() -> BTreeSet<String> {
    default_set(DEFAULT_HEADER_ALLOWLIST)
}

fn default_truncation_bytes() -> usize {
    DEFAULT_TRUNCATION_BYTES
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            enabled: true,
            default_strategy: RedactionStrategy::default(),
            sensitive_fields: default_sensitive_fields(),
            allowlist_fields: default_allowlist_fields(),
            header_allowlist: default_header_allowlist(),
            disabled_categories: BTreeSet::new(),
            walk_lists: false,
            differentiate_field_strategies: false,
            hash_truncation_bytes: DEFAULT_TRUNCATION_BYTES,
        }
    }
}

impl SanitizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that turns every scrub into the identity.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SanitizerConfig = serde_json::from_str(json)
            .map_err(|e| SanitizerError::config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), "loaded sanitizer config");
        Ok(config)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config named by `PII_SANITIZER_CONFIG`, or the defaults when unset.
    pub fn resolve() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject contradictory or out-of-range settings.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != CONFIG_SCHEMA_VERSION {
            return Err(SanitizerError::config(format!(
                "unsupported schema version '{}' (expected {})",
                self.schema_version, CONFIG_SCHEMA_VERSION
            )));
        }

        if !(MIN_TRUNCATION_BYTES..=MAX_TRUNCATION_BYTES).contains(&self.hash_truncation_bytes) {
            return Err(SanitizerError::config(format!(
                "hash_truncation_bytes must be between {} and {}, got {}",
                MIN_TRUNCATION_BYTES, MAX_TRUNCATION_BYTES, self.hash_truncation_bytes
            )));
        }

        for (set, name) in [
            (&self.sensitive_fields, "sensitive_fields"),
            (&self.allowlist_fields, "allowlist_fields"),
            (&self.header_allowlist, "header_allowlist"),
        ] {
            if set.iter().any(|f| f.trim().is_empty()) {
                return Err(SanitizerError::config(format!(
                    "{} contains an empty name",
                    name
                )));
            }
        }

        let allowlist: BTreeSet<String> = self
            .allowlist_fields
            .iter()
            .map(|f| normalize_field_name(f))
            .collect();
        if let Some(field) = self
            .sensitive_fields
            .iter()
            .find(|f| allowlist.contains(&normalize_field_name(f)))
        {
            return Err(SanitizerError::config(format!(
                "field '{}' is both sensitive and allowlisted",
                field
            )));
        }

        if let Some(header) = self
            .header_allowlist
            .iter()
            .find(|h| SENSITIVE_HEADERS.iter().any(|s| s.eq_ignore_ascii_case(h)))
        {
            return Err(SanitizerError::config(format!(
                "header '{}' carries credentials and cannot be allowlisted",
                header
            )));
        }

        Ok(())
    }

    /// SHA-256 hex digest of the canonical JSON form.
    pub fn fingerprint(&self) -> Result<String> {
        let canonical = serde_json::to_vec(self).map_err(|_| SanitizerError::internal())?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }

    /// Field-name sets for the structured scrubber.
    pub fn field_policy(&self) -> FieldPolicySets {
        FieldPolicySets::new(&self.sensitive_fields, &self.allowlist_fields)
    }

    /// Whether `name` is an allowlisted header (case-insensitive).
    pub fn is_header_allowlisted(&self, name: &str) -> bool {
        self.header_allowlist
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_default_strategy(mut self, strategy: RedactionStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    pub fn with_sensitive_field(mut self, name: &str) -> Self {
        self.sensitive_fields.insert(name.to_string());
        self
    }

    pub fn with_allowlist_field(mut self, name: &str) -> Self {
        self.allowlist_fields.insert(name.to_string());
        self
    }

    pub fn with_disabled_category(mut self, category: DetectionCategory) -> Self {
        self.disabled_categories.insert(category);
        self
    }

    pub fn with_walk_lists(mut self, walk: bool) -> Self {
        self.walk_lists = walk;
        self
    }

    pub fn with_differentiated_strategies(mut self, on: bool) -> Self {
        self.differentiate_field_strategies = on;
        self
    }
}
