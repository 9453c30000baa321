//! Format-preserving maskers, one per category.
//!
//! Every masker output is chosen so that it no longer matches any detection
//! pattern; scrubbing already-scrubbed text is a no-op.

/// Replacement for a Luhn-valid card number.
pub const CARD_PLACEHOLDER: &str = "[CARD]";

/// Replacement for a bearer token header value.
pub const BEARER_PLACEHOLDER: &str = "Bearer [REDACTED]";

/// Replacement for an IPv6 address.
pub const IPV6_PLACEHOLDER: &str = "[IPv6_REDACTED]";

/// Replacement for vendor secrets (AWS, GitHub, Slack).
pub const SECRET_PLACEHOLDER: &str = "[SECRET_REDACTED]";

/// Replacement for sensitive structured fields.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Number of stars appended to an international phone prefix.
const PHONE_STAR_COUNT: usize = 9;

pub fn mask_card(_card: &str) -> String {
    CARD_PLACEHOLDER.to_string()
}

/// `info@example.com` -> `i**@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}**@{}", first, domain)
        }
        None => "[EMAIL]".to_string(),
    }
}

/// `+43 664 1234567` -> `+43*********`, `(555) 123-4567` -> `***-***-4567`
pub fn mask_phone(phone: &str) -> String {
    if phone.starts_with('+') {
        let prefix: String = phone.chars().take(3).collect();
        return format!("{}{}", prefix, "*".repeat(PHONE_STAR_COUNT));
    }

    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("***-***-{}", tail)
}

/// `AT61 1904 3002 3457 3201` -> `AT61***`
pub fn mask_iban(iban: &str) -> String {
    let compact: String = iban.chars().filter(|c| *c != ' ').collect();
    let prefix: String = compact.chars().take(4).collect();
    format!("{}***", prefix)
}

pub fn mask_bearer(_token: &str) -> String {
    BEARER_PLACEHOLDER.to_string()
}

/// `192.168.1.100` -> `192.168.*.*`
pub fn mask_ipv4(ip: &str) -> String {
    let mut octets = ip.split('.');
    match (octets.next(), octets.next()) {
        (Some(a), Some(b)) => format!("{}.{}.*.*", a, b),
        _ => "*.*.*.*".to_string(),
    }
}

pub fn mask_ipv6(_ip: &str) -> String {
    IPV6_PLACEHOLDER.to_string()
}

pub fn mask_secret(_secret: &str) -> String {
    SECRET_PLACEHOLDER.to_string()
}

/// Partial reveal for a sensitive field value: first two and last two
/// characters survive, values of four characters or fewer are fully starred.
pub fn mask_field_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}
