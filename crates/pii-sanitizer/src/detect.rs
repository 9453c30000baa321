//! PII detection rules and the ordered registry that applies them.
//!
//! Each rule couples a regex with an optional validator and a masker. The
//! registry applies rules strictly in priority order, each one over the text
//! as already rewritten by the rules before it.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::mask;
use crate::validate;
use crate::{DetectionCategory, Result, SanitizerError};

/// Predicate deciding whether a pattern match is really of the rule's category.
pub type Validator = fn(&Candidate<'_>) -> bool;

/// Turns a matched value into its redacted form.
pub type Masker = fn(&str) -> String;

// Pre-compiled built-in patterns. The regex crate matches in linear time, so
// none of these can backtrack catastrophically on hostile input.
static RE_CREDIT_CARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}[ -]?[0-9]{4}\b").unwrap()
});

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static RE_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        // +43 664 1234567, +49-30-12345678, +41 79 123 45 67
        r"\+[0-9]{1,3}(?:[ -]?\(?[0-9]{1,4}\)?){2,5}",
        // (555) 123-4567, 555.123.4567
        r"|(?:\([0-9]{3}\) ?|\b[0-9]{3}[ .-])[0-9]{3}[ .-][0-9]{4}\b",
        // 0664 1234567, 030/12345678
        r"|\b0[1-9][0-9]{1,3}[ /-]?[0-9]{5,9}\b",
    ))
    .unwrap()
});

static RE_IBAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:AT|DE|CH)[0-9]{2}(?: ?[0-9]{4}){3,5}(?: ?[0-9]{1,2})?\b").unwrap()
});

static RE_BEARER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Bearer\s+[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap()
});

static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
    )
    .unwrap()
});

static RE_IPV6: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b").unwrap());

static RE_AWS_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"AKIA[0-9A-Z]{16}").unwrap());

static RE_GITHUB_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"gh[pousr]_[A-Za-z0-9_]{30,}").unwrap());

static RE_SLACK_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"xox[baprs]-[0-9A-Za-z-]+").unwrap());

/// A pattern match together with the text around it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'h> {
    haystack: &'h str,
    start: usize,
    end: usize,
}

impl<'h> Candidate<'h> {
    /// Create a candidate for `haystack[start..end]`.
    ///
    /// Offsets must lie on char boundaries.
    pub fn new(haystack: &'h str, start: usize, end: usize) -> Self {
        Self {
            haystack,
            start,
            end,
        }
    }

    /// The matched text.
    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.start..self.end]
    }

    /// Text preceding the match.
    pub fn before(&self) -> &'h str {
        &self.haystack[..self.start]
    }

    /// Text following the match.
    pub fn after(&self) -> &'h str {
        &self.haystack[self.end..]
    }
}

/// One redaction performed by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHit {
    /// Category of the redacted value.
    pub category: DetectionCategory,
}

/// A single detection rule.
#[derive(Debug, Clone)]
pub struct DetectorRule {
    category: DetectionCategory,
    pattern: Regex,
    validator: Option<Validator>,
    masker: Masker,
    priority: u16,
}

impl DetectorRule {
    /// Build a rule from a pattern string.
    pub fn new(
        category: DetectionCategory,
        pattern: &str,
        validator: Option<Validator>,
        masker: Masker,
        priority: u16,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| SanitizerError::PatternError(format!("{}: {}", category, e)))?;
        Ok(Self::from_regex(category, pattern, validator, masker, priority))
    }

    /// Build a rule from an already compiled regex.
    pub fn from_regex(
        category: DetectionCategory,
        pattern: Regex,
        validator: Option<Validator>,
        masker: Masker,
        priority: u16,
    ) -> Self {
        Self {
            category,
            pattern,
            validator,
            masker,
            priority,
        }
    }

    /// The built-in rule for a category.
    pub fn builtin(category: DetectionCategory) -> Self {
        let (pattern, validator, masker): (&Regex, Option<Validator>, Masker) = match category {
            DetectionCategory::CreditCard => (
                &RE_CREDIT_CARD,
                Some(validate::card_candidate),
                mask::mask_card,
            ),
            DetectionCategory::EmailAddress => (&RE_EMAIL, None, mask::mask_email),
            DetectionCategory::PhoneNumber => (&RE_PHONE, None, mask::mask_phone),
            DetectionCategory::Iban => (&RE_IBAN, None, mask::mask_iban),
            DetectionCategory::BearerToken => (&RE_BEARER, None, mask::mask_bearer),
            DetectionCategory::Ipv4 => (&RE_IPV4, None, mask::mask_ipv4),
            DetectionCategory::Ipv6 => (&RE_IPV6, None, mask::mask_ipv6),
            DetectionCategory::AwsSecretKey => (&RE_AWS_KEY, None, mask::mask_secret),
            DetectionCategory::GithubToken => (&RE_GITHUB_TOKEN, None, mask::mask_secret),
            DetectionCategory::SlackToken => (&RE_SLACK_TOKEN, None, mask::mask_secret),
        };

        Self::from_regex(
            category,
            pattern.clone(),
            validator,
            masker,
            category.priority(),
        )
    }

    pub fn category(&self) -> DetectionCategory {
        self.category
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    /// Apply this rule to `text`, pushing one hit per redaction.
    ///
    /// Matches rejected by the validator are copied through untouched.
    pub fn apply<'t>(&self, text: &'t str, hits: &mut Vec<CategoryHit>) -> Cow<'t, str> {
        let mut output = String::new();
        let mut last = 0;
        let mut replaced = false;

        for m in self.pattern.find_iter(text) {
            if let Some(validator) = self.validator {
                if !validator(&Candidate::new(text, m.start(), m.end())) {
                    continue;
                }
            }

            output.push_str(&text[last..m.start()]);
            output.push_str(&(self.masker)(m.as_str()));
            last = m.end();
            replaced = true;
            hits.push(CategoryHit {
                category: self.category,
            });
        }

        if !replaced {
            return Cow::Borrowed(text);
        }

        output.push_str(&text[last..]);
        Cow::Owned(output)
    }
}

/// Ordered, immutable list of detection rules.
#[derive(Debug, Clone)]
pub struct DetectorRegistry {
    rules: Vec<DetectorRule>,
}

impl DetectorRegistry {
    /// Create a registry; rules are sorted by priority (stable for ties).
    pub fn new(mut rules: Vec<DetectorRule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// Registry with every built-in rule.
    pub fn builtin() -> Self {
        Self::builtin_except(&[])
    }

    /// Registry with the built-in rules minus the given categories.
    pub fn builtin_except(disabled: &[DetectionCategory]) -> Self {
        let rules = DetectionCategory::ALL
            .iter()
            .filter(|c| !disabled.contains(c))
            .map(|c| DetectorRule::builtin(*c))
            .collect();
        Self::new(rules)
    }

    pub fn rules(&self) -> &[DetectorRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order and collect the hits.
    pub fn apply_all(&self, text: &str) -> (String, Vec<CategoryHit>) {
        let mut hits = Vec::new();
        let mut current = Cow::Borrowed(text);

        for rule in &self.rules {
            let rewritten = match rule.apply(&current, &mut hits) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = rewritten {
                current = Cow::Owned(s);
            }
        }

        (current.into_owned(), hits)
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
