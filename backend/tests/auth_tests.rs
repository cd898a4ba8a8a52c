//! Staff/identity tests
//!
//! Covers input validation, role handling and the bcrypt hashing path
//! shared by every account including the seeded administrator.

use shared::types::StaffRole;
use shared::validation::{validate_email, validate_password, validate_username};

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(validate_username("warehouse.lead").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("contains space").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("lead@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(StaffRole::parse(StaffRole::Admin.as_str()), StaffRole::Admin);
        assert_eq!(StaffRole::parse(StaffRole::Staff.as_str()), StaffRole::Staff);
    }

    #[test]
    fn test_unknown_role_defaults_to_staff() {
        assert_eq!(StaffRole::parse("superuser"), StaffRole::Staff);
        assert!(!StaffRole::parse("superuser").is_admin());
    }
}

#[cfg(test)]
mod hashing_tests {
    /// Hash verification succeeds for the original password only.
    /// Low cost keeps the test fast; the server uses DEFAULT_COST.
    #[test]
    fn test_bcrypt_round_trip() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }

    /// Hashing is one-way salted: the same password never hashes to the
    /// same string twice, so equality comparison can never substitute
    /// for verification.
    #[test]
    fn test_hash_is_salted() {
        let a = bcrypt::hash("correct horse", 4).unwrap();
        let b = bcrypt::hash("correct horse", 4).unwrap();
        assert_ne!(a, b);
        assert!(bcrypt::verify("correct horse", &a).unwrap());
        assert!(bcrypt::verify("correct horse", &b).unwrap());
    }
}
