//! # Card-Login Credential Classification
//!
//! A customer logs into their card with a single free-form credential: either
//! the member code (any letter case) or the raw mobile number. Classification
//! is pure; resolution against the store happens in the repository and must
//! match exactly one non-deleted customer.
//!
//! Zero matches and ambiguous matches are both reported as one generic
//! "not found"; callers get no distinction between "wrong format" and
//! "no such record".

use crate::error::ValidationError;
use crate::member_id::{looks_like_member_code, normalize_member_code};

// =============================================================================
// Login Key
// =============================================================================

/// A classified card-login credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginKey {
    /// Canonical (upper-case) member code.
    MemberCode(String),
    /// Raw mobile number, digits as entered.
    Mobile(String),
}

impl LoginKey {
    /// Classifies a raw credential.
    ///
    /// Anything with the member-code prefix is parsed as a code; everything
    /// else is treated as a mobile number as long as it is non-empty digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "credential".to_string(),
            });
        }

        if looks_like_member_code(raw) {
            return Ok(LoginKey::MemberCode(normalize_member_code(raw)?));
        }

        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "credential".to_string(),
                reason: "expected a member code or a mobile number".to_string(),
            });
        }

        Ok(LoginKey::Mobile(raw.to_string()))
    }

    /// The value to match against the store, canonical form.
    pub fn as_str(&self) -> &str {
        match self {
            LoginKey::MemberCode(code) => code,
            LoginKey::Mobile(mobile) => mobile,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_code_classified_case_insensitively() {
        assert_eq!(
            LoginKey::parse("msc0042").unwrap(),
            LoginKey::MemberCode("MSC0042".to_string())
        );
    }

    #[test]
    fn test_digits_classified_as_mobile() {
        assert_eq!(
            LoginKey::parse("03001234567").unwrap(),
            LoginKey::Mobile("03001234567".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_and_mixed_garbage() {
        assert!(LoginKey::parse("").is_err());
        assert!(LoginKey::parse("   ").is_err());
        assert!(LoginKey::parse("hello").is_err());
        assert!(LoginKey::parse("0300-123").is_err());
    }

    #[test]
    fn test_malformed_code_is_an_error_not_a_mobile() {
        // Starts with the prefix but is not a valid code; must not fall
        // through to the mobile branch.
        assert!(LoginKey::parse("MSC12A4").is_err());
    }
}
