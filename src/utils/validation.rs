use crate::utils::error::{Result, WaitlistError};
use regex::Regex;
use std::sync::OnceLock;

pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
pub const EMAIL_INVALID_MESSAGE: &str = "Please enter a valid email address";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .unwrap()
    })
}

/// Syntactic email check. The value is never normalized: only the empty
/// string counts as missing, and whitespace-only input is malformed.
pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(WaitlistError::validation(field_name, EMAIL_REQUIRED_MESSAGE));
    }

    // regex crate 不支援 lookahead，開頭的點和連續的點另外檢查
    let well_formed =
        !email.starts_with('.') && !email.contains("..") && email_regex().is_match(email);

    if !well_formed {
        return Err(WaitlistError::validation(field_name, EMAIL_INVALID_MESSAGE));
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(WaitlistError::config(format!("{}: path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(WaitlistError::config(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WaitlistError::config(format!(
            "{}: value cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

/// Storage keys become file names, so path separators are rejected.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains(['/', '\\', '\0']) || key == "." || key == ".." {
        return Err(WaitlistError::config(format!(
            "{}: `{}` is not a valid storage key",
            field_name, key
        )));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WaitlistError::config(format!(
            "{}: value {} must be between {} and {}",
            field_name, value, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    fn message_of(result: Result<()>) -> String {
        match result {
            Err(WaitlistError::ValidationError { message, .. }) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("email", "a@example.com").is_ok());
        assert!(validate_email("email", "user.name@domain.co.uk").is_ok());
        assert!(validate_email("email", "user+tag@example.org").is_ok());
        assert!(validate_email("email", "Mixed.Case@Example.COM").is_ok());
    }

    #[test]
    fn test_empty_email_is_required() {
        assert_eq!(message_of(validate_email("email", "")), EMAIL_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_whitespace_only_email_is_malformed() {
        assert_eq!(message_of(validate_email("email", "   ")), EMAIL_INVALID_MESSAGE);
        assert_eq!(message_of(validate_email("email", "\t")), EMAIL_INVALID_MESSAGE);
    }

    #[test]
    fn test_malformed_emails() {
        for bad in [
            "not-an-email",
            "missing-domain@",
            "@nodomain.com",
            "user@localhost",
            "spaces in@email.com",
            " a@example.com",
            ".lead@example.com",
            "double..dot@example.com",
            "user@-bad.com",
        ] {
            assert_eq!(
                message_of(validate_email("email", bad)),
                EMAIL_INVALID_MESSAGE,
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_storage_key() {
        assert!(validate_storage_key("storage.key", "waitlist").is_ok());
        assert!(validate_storage_key("storage.key", "").is_err());
        assert!(validate_storage_key("storage.key", "../etc").is_err());

        let err = validate_storage_key("storage.key", "a/b").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("form.success_reset_seconds", 5u64, 1, 3600).is_ok());
        assert!(validate_range("form.success_reset_seconds", 0u64, 1, 3600).is_err());
    }
}
