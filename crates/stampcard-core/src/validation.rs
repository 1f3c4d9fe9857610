//! # Validation Module
//!
//! Field validation for enrollment and staff-account forms.
//!
//! Validation runs early, in the app layer, before business logic; the store
//! schema (NOT NULL, UNIQUE) is the backstop behind it.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Customer Fields
// =============================================================================

/// Validates a customer display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a mobile number.
///
/// ## Rules
/// - Digits only (the number is also a card-login credential, so it must
///   never collide with the member-code namespace)
/// - Between 7 and 15 digits
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobile".to_string(),
        });
    }

    if !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if mobile.len() < 7 {
        return Err(ValidationError::TooShort {
            field: "mobile".to_string(),
            min: 7,
        });
    }

    if mobile.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "mobile".to_string(),
            max: 15,
        });
    }

    Ok(())
}

// =============================================================================
// Admin Fields
// =============================================================================

/// Validates a staff username.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: 3,
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, dots, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a staff password before hashing.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    Ok(())
}

/// Validates a security question or answer.
pub fn validate_security_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Search Queries
// =============================================================================

/// Validates a staff search query.
///
/// ## Rules
/// - Can be empty (returns the default listing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Ayesha Khan").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("03001234567").is_ok());
        assert!(validate_mobile("1234567").is_ok());

        assert!(validate_mobile("").is_err());
        assert!(validate_mobile("0300-123").is_err());
        assert!(validate_mobile("123456").is_err());
        assert!(validate_mobile(&"1".repeat(16)).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("front.desk").is_ok());
        assert!(validate_username("staff_01").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_security_text() {
        assert!(validate_security_text("security answer", "blue").is_ok());
        assert!(validate_security_text("security answer", "").is_err());
        assert!(validate_security_text("security question", &"q".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  ayesha ").unwrap(), "ayesha");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(150)).is_err());
    }
}
