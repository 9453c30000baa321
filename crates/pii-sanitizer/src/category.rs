//! Detection categories and the metric buckets they count into.

use serde::{Deserialize, Serialize};

/// Category of personal or secret data recognised in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionCategory {
    /// Email address (local@domain)
    EmailAddress,
    /// International or national phone number
    PhoneNumber,
    /// Payment card number (Luhn-valid)
    CreditCard,
    /// AT/DE/CH bank account number
    Iban,
    /// `Bearer` header carrying a JWT-shaped token
    BearerToken,
    /// Dotted-quad IPv4 address
    Ipv4,
    /// Full eight-hextet IPv6 address
    Ipv6,
    /// AWS access key id (AKIA...)
    AwsSecretKey,
    /// GitHub token (ghp_...)
    GithubToken,
    /// Slack token (xoxb-...)
    SlackToken,
}

impl DetectionCategory {
    /// Every category, in the order rules are applied.
    pub const ALL: [DetectionCategory; 10] = [
        DetectionCategory::CreditCard,
        DetectionCategory::EmailAddress,
        DetectionCategory::PhoneNumber,
        DetectionCategory::Iban,
        DetectionCategory::BearerToken,
        DetectionCategory::Ipv4,
        DetectionCategory::Ipv6,
        DetectionCategory::AwsSecretKey,
        DetectionCategory::GithubToken,
        DetectionCategory::SlackToken,
    ];

    /// Application priority of the built-in rule (lower runs first).
    ///
    /// Card numbers must be consumed before phone numbers: a card-shaped
    /// digit run left in the text is fair game for the looser phone pattern.
    pub fn priority(&self) -> u16 {
        match self {
            DetectionCategory::CreditCard => 10,
            DetectionCategory::EmailAddress => 20,
            DetectionCategory::PhoneNumber => 30,
            DetectionCategory::Iban => 40,
            DetectionCategory::BearerToken => 50,
            DetectionCategory::Ipv4 => 60,
            DetectionCategory::Ipv6 => 70,
            DetectionCategory::AwsSecretKey => 80,
            DetectionCategory::GithubToken => 90,
            DetectionCategory::SlackToken => 100,
        }
    }

    /// Metric bucket this category counts into.
    pub fn metric_key(&self) -> MetricKey {
        match self {
            DetectionCategory::EmailAddress => MetricKey::Emails,
            DetectionCategory::PhoneNumber => MetricKey::Phones,
            DetectionCategory::CreditCard => MetricKey::Cards,
            DetectionCategory::Iban => MetricKey::Ibans,
            DetectionCategory::BearerToken => MetricKey::Jwts,
            DetectionCategory::Ipv4 | DetectionCategory::Ipv6 => MetricKey::Ips,
            DetectionCategory::AwsSecretKey
            | DetectionCategory::GithubToken
            | DetectionCategory::SlackToken => MetricKey::Secrets,
        }
    }

    /// Parse a category from its snake_case name.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "email_address" => Some(DetectionCategory::EmailAddress),
            "phone_number" => Some(DetectionCategory::PhoneNumber),
            "credit_card" => Some(DetectionCategory::CreditCard),
            "iban" => Some(DetectionCategory::Iban),
            "bearer_token" => Some(DetectionCategory::BearerToken),
            "ipv4" => Some(DetectionCategory::Ipv4),
            "ipv6" => Some(DetectionCategory::Ipv6),
            "aws_secret_key" => Some(DetectionCategory::AwsSecretKey),
            "github_token" => Some(DetectionCategory::GithubToken),
            "slack_token" => Some(DetectionCategory::SlackToken),
            _ => None,
        }
    }
}

impl std::fmt::Display for DetectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DetectionCategory::EmailAddress => "email_address",
            DetectionCategory::PhoneNumber => "phone_number",
            DetectionCategory::CreditCard => "credit_card",
            DetectionCategory::Iban => "iban",
            DetectionCategory::BearerToken => "bearer_token",
            DetectionCategory::Ipv4 => "ipv4",
            DetectionCategory::Ipv6 => "ipv6",
            DetectionCategory::AwsSecretKey => "aws_secret_key",
            DetectionCategory::GithubToken => "github_token",
            DetectionCategory::SlackToken => "slack_token",
        };
        write!(f, "{}", s)
    }
}

/// Counter bucket exposed in metrics snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Emails,
    Phones,
    Cards,
    Ibans,
    /// IPv4 and IPv6 combined
    Ips,
    Jwts,
    /// AWS, GitHub and Slack combined
    Secrets,
}

impl MetricKey {
    /// Number of metric buckets.
    pub const COUNT: usize = 7;

    /// Every bucket, in snapshot order.
    pub const ALL: [MetricKey; MetricKey::COUNT] = [
        MetricKey::Emails,
        MetricKey::Phones,
        MetricKey::Cards,
        MetricKey::Ibans,
        MetricKey::Ips,
        MetricKey::Jwts,
        MetricKey::Secrets,
    ];

    /// Slot of this bucket in a counter array.
    pub fn index(&self) -> usize {
        match self {
            MetricKey::Emails => 0,
            MetricKey::Phones => 1,
            MetricKey::Cards => 2,
            MetricKey::Ibans => 3,
            MetricKey::Ips => 4,
            MetricKey::Jwts => 5,
            MetricKey::Secrets => 6,
        }
    }

    /// Counter name as it appears in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Emails => "emails_redacted",
            MetricKey::Phones => "phones_redacted",
            MetricKey::Cards => "cards_redacted",
            MetricKey::Ibans => "ibans_redacted",
            MetricKey::Ips => "ips_redacted",
            MetricKey::Jwts => "jwts_redacted",
            MetricKey::Secrets => "secrets_redacted",
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
