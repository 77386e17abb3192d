//! # Validation Module
//!
//! Field validation rules shared by every form in the storefront.
//!
//! ## Validation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input &str ──► validate_*() ──► Ok(())                 (field valid)   │
//! │                              └─► Err(ValidationError)   (show message)  │
//! │                                                                         │
//! │  • Validators never panic and never perform I/O                        │
//! │  • err.to_string() is the exact text rendered under the field          │
//! │  • Checks run in a fixed order; the first failing check wins           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The async email-availability check lives in `storefront-forms`, since it
//! needs a timer.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot inside the domain.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

// =============================================================================
// Credential Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must look like `local@domain.tld`
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert_eq!(validate_email("").unwrap_err().to_string(), "Email is required");
/// assert_eq!(validate_email("missing@").unwrap_err().to_string(), "Invalid email format");
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() {
        return Err(ValidationError::required("Email"));
    }

    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validates password strength.
///
/// ## Rules
/// - Must not be empty
/// - At least [`MIN_PASSWORD_LENGTH`] characters
/// - At least one ASCII digit
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("Password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MissingDigit {
            field: "Password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Generic Validators
// =============================================================================

/// Validates that a field is not empty or whitespace-only.
pub fn validate_required(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates that a field has at least `min` characters.
///
/// An empty value reports `Required` rather than `TooShort`.
pub fn validate_min_length(value: &str, min: usize, field: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    Ok(())
}

/// Validates that two values are identical (e.g. password confirmation).
///
/// `field` is plural by convention: "Passwords" → "Passwords do not match".
pub fn validate_match(value: &str, other: &str, field: &str) -> ValidationResult<()> {
    if value != other {
        return Err(ValidationError::Mismatch {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price typed into a form.
///
/// The whole trimmed string must parse as a finite number that is at least
/// one cent once rounded, so `"0.004"` fails. Trailing garbage such as
/// `"12abc"` is rejected.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price;
///
/// assert!(validate_price("9.99").is_ok());
/// assert!(validate_price("0").is_err());
/// assert!(validate_price("abc").is_err());
/// ```
pub fn validate_price(value: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::NotPositiveNumber {
        field: "Price".to_string(),
    };

    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !parsed.is_finite() || Money::from_dollars(parsed).cents() <= 0 {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a whole number greater than or equal to zero (stock counts).
pub fn validate_non_negative_integer(value: &str, field: &str) -> ValidationResult<()> {
    match value.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(()),
        _ => Err(ValidationError::NotNonNegativeInteger {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: ValidationResult<()>) -> String {
        result.err().map(|e| e.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(message(validate_email("")), "Email is required");
        assert_eq!(message(validate_email("notanemail")), "Invalid email format");
        assert_eq!(message(validate_email("missing@")), "Invalid email format");
        assert_eq!(message(validate_email("a b@example.com")), "Invalid email format");
        assert_eq!(message(validate_email("a@@example.com")), "Invalid email format");
        assert_eq!(message(validate_email("user@example")), "Invalid email format");
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.co.uk").is_ok());
    }

    #[test]
    fn test_emails_without_at_or_dot_are_invalid() {
        for email in ["userexample.com", "user@examplecom", "plain", "a.b.c", "x@y"] {
            assert_eq!(
                message(validate_email(email)),
                "Invalid email format",
                "email: {email}"
            );
        }
    }

    #[test]
    fn test_validate_password() {
        assert_eq!(message(validate_password("")), "Password is required");
        assert_eq!(
            message(validate_password("Ab1")),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            message(validate_password("Abcdefg")),
            "Password must contain at least one number"
        );
        assert!(validate_password("Abcdef1").is_ok());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_password_valid_iff_long_enough_with_digit() {
        let samples = [
            "", "a", "12345", "abcdef", "abcde1", "1abcde", "      ", "     1", "pässw0rd",
            "ab1", "abcdefghijklmnop", "abcdefghijklmno9",
        ];

        for p in samples {
            let expected = p.chars().count() >= 6 && p.chars().any(|c| c.is_ascii_digit());
            assert_eq!(validate_password(p).is_ok(), expected, "password: {p:?}");
        }
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(message(validate_required("", "Name")), "Name is required");
        assert_eq!(message(validate_required("   ", "Name")), "Name is required");
        assert!(validate_required("John", "Name").is_ok());
    }

    #[test]
    fn test_validate_min_length() {
        assert_eq!(
            message(validate_min_length("ab", 3, "Username")),
            "Username must be at least 3 characters"
        );
        assert_eq!(
            message(validate_min_length("", 3, "Username")),
            "Username is required"
        );
        assert!(validate_min_length("abc", 3, "Username").is_ok());
    }

    #[test]
    fn test_validate_match() {
        assert_eq!(
            message(validate_match("abc", "def", "Passwords")),
            "Passwords do not match"
        );
        assert!(validate_match("abc", "abc", "Passwords").is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(
            message(validate_price("abc")),
            "Price must be a positive number"
        );
        assert!(validate_price("0").is_err());
        assert!(validate_price("-5").is_err());
        assert!(validate_price("NaN").is_err());
        assert!(validate_price("inf").is_err());
        assert!(validate_price("12abc").is_err());
        assert!(validate_price("").is_err());
        assert!(validate_price("0.004").is_err());
        assert!(validate_price("0.005").is_ok());
        assert!(validate_price("9.99").is_ok());
        assert!(validate_price(" 10 ").is_ok());
    }

    #[test]
    fn test_validate_non_negative_integer() {
        assert_eq!(
            message(validate_non_negative_integer("-1", "Stock")),
            "Stock must be a non-negative integer"
        );
        assert!(validate_non_negative_integer("2.5", "Stock").is_err());
        assert!(validate_non_negative_integer("", "Stock").is_err());
        assert!(validate_non_negative_integer("0", "Stock").is_ok());
        assert!(validate_non_negative_integer("42", "Stock").is_ok());
    }
}
