//! # Member Code Assignment
//!
//! New customers receive `member_code = "MSC" + zero-padded(count + 1, 4)`
//! where `count` is the total number of customer records at enrollment time.
//!
//! Deriving the code from a live count is race-prone on its own; the
//! repository therefore runs the count and the insert inside one store
//! transaction, and the column is UNIQUE so a lost race surfaces as a typed
//! duplicate error instead of two customers sharing a card.

use crate::error::ValidationError;
use crate::MEMBER_CODE_PREFIX;

/// Width of the zero-padded sequence part.
const SEQUENCE_WIDTH: usize = 4;

// =============================================================================
// Assignment
// =============================================================================

/// Returns the member code for the next customer given the current record
/// count.
///
/// Count 0 → `MSC0001`, count 41 → `MSC0042`. Sequences past 9999 keep
/// their full width rather than truncating.
pub fn member_code(count: i64) -> String {
    format!(
        "{}{:0width$}",
        MEMBER_CODE_PREFIX,
        count + 1,
        width = SEQUENCE_WIDTH
    )
}

// =============================================================================
// Parsing
// =============================================================================

/// Normalizes and validates a member code, accepting any letter case.
///
/// Returns the canonical upper-case form (`msc0042` → `MSC0042`).
pub fn normalize_member_code(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_ascii_uppercase();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "member code".to_string(),
        });
    }

    let digits = code
        .strip_prefix(MEMBER_CODE_PREFIX)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "member code".to_string(),
            reason: format!("must start with {MEMBER_CODE_PREFIX}"),
        })?;

    if digits.len() < SEQUENCE_WIDTH || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "member code".to_string(),
            reason: format!("expected {MEMBER_CODE_PREFIX} followed by digits"),
        });
    }

    Ok(code)
}

/// Whether a credential even looks like a member code (used by lookup
/// classification before hitting the store).
pub fn looks_like_member_code(raw: &str) -> bool {
    raw.trim()
        .to_ascii_uppercase()
        .starts_with(MEMBER_CODE_PREFIX)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_code_from_count() {
        assert_eq!(member_code(0), "MSC0001");
        assert_eq!(member_code(41), "MSC0042");
        assert_eq!(member_code(998), "MSC0999");
    }

    #[test]
    fn test_member_code_past_padding_width() {
        assert_eq!(member_code(9999), "MSC10000");
    }

    #[test]
    fn test_normalize_accepts_any_case() {
        assert_eq!(normalize_member_code("msc0042").unwrap(), "MSC0042");
        assert_eq!(normalize_member_code(" MsC0001 ").unwrap(), "MSC0001");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_member_code("").is_err());
        assert!(normalize_member_code("ABC0001").is_err());
        assert!(normalize_member_code("MSC").is_err());
        assert!(normalize_member_code("MSC12A4").is_err());
    }

    #[test]
    fn test_looks_like_member_code() {
        assert!(looks_like_member_code("msc0042"));
        assert!(!looks_like_member_code("03001234567"));
    }
}
