//! Redaction strategies for sensitive structured fields.

use serde::{Deserialize, Serialize};

/// What happens to the value of a field whose *name* is sensitive.
///
/// Detected PII inside ordinary string values is always masked by its
/// category masker; the strategy only governs sensitive field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RedactionStrategy {
    /// Omit the field from the output
    Drop,
    /// Replace with [REDACTED]
    Redact,
    /// Partial reveal
    #[default]
    Mask,
    /// Keyed hash
    Hash,
}

impl RedactionStrategy {
    /// Parse a strategy from a string (case-insensitive).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drop" => Some(RedactionStrategy::Drop),
            "redact" => Some(RedactionStrategy::Redact),
            "mask" => Some(RedactionStrategy::Mask),
            "hash" => Some(RedactionStrategy::Hash),
            _ => None,
        }
    }

    /// Returns whether the field survives in the output at all.
    pub fn keeps_field(&self) -> bool {
        !matches!(self, RedactionStrategy::Drop)
    }
}

impl std::str::FromStr for RedactionStrategy {
    type Err = crate::SanitizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s).ok_or_else(|| {
            crate::SanitizerError::config(format!(
                "unknown redaction strategy '{}' (expected drop, redact, mask or hash)",
                s
            ))
        })
    }
}

impl std::fmt::Display for RedactionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RedactionStrategy::Drop => "drop",
            RedactionStrategy::Redact => "redact",
            RedactionStrategy::Mask => "mask",
            RedactionStrategy::Hash => "hash",
        };
        write!(f, "{}", s)
    }
}
