//! Form field validation.
//!
//! Client-side checks only; the server re-validates everything. Each
//! predicate returns `None` when the field passes or the message shown
//! next to the field.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum accepted full name length.
pub const FULL_NAME_MAX: usize = 100;
/// Maximum accepted address length.
pub const ADDRESS_MAX: usize = 200;

/// Indonesian mobile format: `+62` followed by at least nine digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+62\d{9,}$").expect("valid phone pattern"));

/// Validate a phone number field.
pub fn validate_phone(phone: &str) -> Option<String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Some("Phone number is required".to_string());
    }
    if !PHONE_RE.is_match(phone) {
        return Some("Phone number must be +62 followed by at least 9 digits".to_string());
    }
    None
}

/// Validate a full name field.
pub fn validate_full_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("Full name is required".to_string());
    }
    if name.chars().count() > FULL_NAME_MAX {
        return Some(format!("Full name cannot exceed {FULL_NAME_MAX} characters"));
    }
    None
}

/// Validate an address field.
pub fn validate_address(address: &str) -> Option<String> {
    let address = address.trim();
    if address.is_empty() {
        return Some("Address is required".to_string());
    }
    if address.chars().count() > ADDRESS_MAX {
        return Some(format!("Address cannot exceed {ADDRESS_MAX} characters"));
    }
    None
}

/// Validate a generic required field.
pub fn validate_required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_spec_example() {
        assert!(validate_phone("+62812345678").is_none());
    }

    #[test]
    fn test_phone_rejects_short_number() {
        assert!(validate_phone("+6281234").is_some());
    }

    #[test]
    fn test_phone_rejects_wrong_prefix() {
        assert!(validate_phone("0812345678").is_some());
        assert!(validate_phone("+63812345678").is_some());
    }

    #[test]
    fn test_phone_rejects_non_digits() {
        assert!(validate_phone("+62abcdefghij").is_some());
        assert!(validate_phone("+62 812345678").is_some());
    }

    #[test]
    fn test_full_name_length_cap() {
        assert!(validate_full_name(&"a".repeat(FULL_NAME_MAX)).is_none());
        assert!(validate_full_name(&"a".repeat(FULL_NAME_MAX + 1)).is_some());
        assert!(validate_full_name("   ").is_some());
    }

    #[test]
    fn test_address_length_cap() {
        assert!(validate_address(&"a".repeat(ADDRESS_MAX)).is_none());
        assert!(validate_address(&"a".repeat(ADDRESS_MAX + 1)).is_some());
        assert!(validate_address("").is_some());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("", "Reason").is_some());
        assert!(validate_required("  ", "Reason").is_some());
        assert!(validate_required("ok", "Reason").is_none());
    }
}
