//! Validation utilities for the ASTRA Inventory Platform

/// Validate a username (3-32 characters, alphanumeric plus `.`, `_`, `-`)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 32 {
        return Err("Username must be at most 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err("Username may only contain letters, digits, '.', '_' and '-'");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate an entity name after trimming surrounding whitespace.
/// Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be blank");
    }
    if trimmed.len() > 128 {
        return Err("Name must be at most 128 characters");
    }
    Ok(trimmed)
}

/// Validate that a quantity is strictly positive
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// De-duplicate a list of strings (case-sensitive), preserving the order
/// of first occurrence. Used for category make/model enumerations.
pub fn dedupe_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Append a value to a list only when it is not already present.
/// Returns true when the list changed.
pub fn push_unique(values: &mut Vec<String>, value: String) -> bool {
    if values.contains(&value) {
        false
    } else {
        values.push(value);
        true
    }
}

/// Remove every occurrence of a value from a list.
/// Returns true when the list changed.
pub fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value);
    values.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("gyro.admin").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Lab1  "), Ok("Lab1"));
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_dedupe_preserves_first_occurrence_order() {
        let input = vec!["ABC", "DEF", "ABC", "abc", "DEF"]
            .into_iter()
            .map(String::from)
            .collect();
        let out = dedupe_preserving_order(input);
        assert_eq!(out, vec!["ABC", "DEF", "abc"]);
    }

    #[test]
    fn test_push_unique_is_idempotent() {
        let mut makes = vec!["ABC".to_string()];
        assert!(!push_unique(&mut makes, "ABC".to_string()));
        assert!(push_unique(&mut makes, "XYZ".to_string()));
        assert_eq!(makes, vec!["ABC", "XYZ"]);
    }

    #[test]
    fn test_remove_value() {
        let mut models = vec!["X1".to_string(), "X2".to_string()];
        assert!(remove_value(&mut models, "X1"));
        assert!(!remove_value(&mut models, "X1"));
        assert_eq!(models, vec!["X2"]);
    }
}
