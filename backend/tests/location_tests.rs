//! Storage location tests

use shared::validation::validate_name;

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed_before_use() {
        assert_eq!(validate_name("  Lab1 "), Ok("Lab1"));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("\t\n").is_err());
    }

    #[test]
    fn test_duplicate_detection_uses_trimmed_name() {
        // " Lab1 " and "Lab1" collide after trimming
        let a = validate_name(" Lab1 ").unwrap();
        let b = validate_name("Lab1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlong_name_rejected() {
        assert!(validate_name(&"x".repeat(129)).is_err());
    }
}
