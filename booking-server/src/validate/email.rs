//! Email address syntax checks.

use validator::ValidateEmail;

/// Check email syntax: `local@domain.tld`.
///
/// Syntax follows the `validator` crate's HTML5 rules. The domain must also
/// end in an alphabetic top-level label of two or more letters, so bare hosts
/// and IP literals are rejected.
///
/// # Examples
///
/// ```
/// use booking_server::validate::is_email;
///
/// assert!(is_email("admin@akasha.travel"));
/// assert!(!is_email("not-an-email"));
/// assert!(!is_email("a@b"));
/// ```
pub fn is_email(s: &str) -> bool {
    s.to_string().validate_email() && has_tld(s)
}

/// Trim and lower-case an address.
pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

fn has_tld(s: &str) -> bool {
    s.rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(_, tld)| tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic()))
}
