//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld, each part free of whitespace and '@'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Minimal syntactic email check; not RFC 5322 validation
pub fn is_valid_email_format(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logs (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Normalize an email for lookups: trimmed and lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
