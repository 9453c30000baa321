//! Field-name classification for structured records.

use std::collections::BTreeSet;

/// Default names whose values are always redacted.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "pass",
    "secret",
    "token",
    "api_key",
    "apikey",
    "authorization",
    "auth",
    "cookie",
    "session",
];

/// Default names whose values pass through untouched.
pub const DEFAULT_ALLOWLIST_FIELDS: &[&str] =
    &["timestamp", "level", "severity", "channel", "context"];

/// Default headers that are never scrubbed.
pub const DEFAULT_HEADER_ALLOWLIST: &[&str] = &[
    "content-type",
    "content-length",
    "accept",
    "accept-encoding",
    "user-agent",
    "host",
    "connection",
    "cache-control",
];

/// Headers whose values are replaced wholesale.
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// How a field name is treated by the structured scrubber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Value passes unchanged.
    Allowlisted,
    /// Value is subject to the redaction strategy.
    Sensitive,
    /// Value is walked and scrubbed by content.
    Ordinary,
}

/// Sensitive and allowlisted field names.
///
/// Names are compared after [`normalize_field_name`], so `API-Key`,
/// `api_key` and `Api_Key` are the same field.
#[derive(Debug, Clone, Default)]
pub struct FieldPolicySets {
    sensitive: BTreeSet<String>,
    allowlist: BTreeSet<String>,
}

impl FieldPolicySets {
    pub fn new<'a, S, A>(sensitive: S, allowlist: A) -> Self
    where
        S: IntoIterator<Item = &'a String>,
        A: IntoIterator<Item = &'a String>,
    {
        Self {
            sensitive: sensitive.into_iter().map(|s| normalize_field_name(s)).collect(),
            allowlist: allowlist.into_iter().map(|s| normalize_field_name(s)).collect(),
        }
    }

    pub fn is_sensitive(&self, field: &str) -> bool {
        self.sensitive.contains(&normalize_field_name(field))
    }

    pub fn is_allowlisted(&self, field: &str) -> bool {
        self.allowlist.contains(&normalize_field_name(field))
    }

    /// Classify a field name; the allowlist wins over the sensitive set.
    pub fn classify(&self, field: &str) -> FieldClass {
        let name = normalize_field_name(field);
        if self.allowlist.contains(&name) {
            FieldClass::Allowlisted
        } else if self.sensitive.contains(&name) {
            FieldClass::Sensitive
        } else {
            FieldClass::Ordinary
        }
    }
}

/// Lowercase a field name and fold `-` into `_`.
pub fn normalize_field_name(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Owned copy of a default name list.
pub(crate) fn default_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}
