//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    let username = username.trim();

    if username.is_empty() {
        return Err("Username is required.".to_string());
    }

    if username.chars().count() < 3 {
        return Err("Username must be at least 3 characters long.".to_string());
    }

    if username.chars().count() > 50 {
        return Err("Username must be at most 50 characters long.".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();

    if email.is_empty() {
        return Err("Email is required.".to_string());
    }

    if email.len() > 100 {
        return Err("Email must be at most 100 characters long.".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format.".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required.".to_string());
    }

    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long.".to_string());
    }

    if password.chars().count() > 100 {
        return Err("Password must be at most 100 characters long.".to_string());
    }

    Ok(())
}

/// Validate a required free-text field
pub fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(format!("{} is required.", field));
    }

    if value.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters long.", field, max_len));
    }

    Ok(())
}

/// Validate a role name against the known roles
pub fn validate_role(role: &str) -> Result<(), String> {
    role.parse::<common::Role>()
        .map(|_| ())
        .map_err(|e| format!("{}.", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(50)).is_ok());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("john.doe@email.com").is_ok());
        assert!(validate_email("admin@").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("user123").is_ok());
        assert!(validate_password(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_required_field() {
        assert_eq!(
            validate_required("Contact", "   ", 100),
            Err("Contact is required.".to_string())
        );
        assert!(validate_required("Contact", "+1-555-0101", 100).is_ok());
    }

    #[test]
    fn test_role_must_be_known() {
        assert!(validate_role("Manager").is_ok());
        assert_eq!(validate_role("manager"), Err("Unknown role: manager.".to_string()));
    }
}
