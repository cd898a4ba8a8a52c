//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Role assigned to a staff account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    #[default]
    Staff,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Staff => "staff",
        }
    }

    /// Parse a role from its stored string form, defaulting to `Staff`
    /// for anything unrecognized.
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => StaffRole::Admin,
            _ => StaffRole::Staff,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, StaffRole::Admin)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock status derived from available stock and the minimum-stock threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Available,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Derive the status for a product. Out-of-stock wins over low-stock
    /// when available stock is zero or negative.
    pub fn derive(available_stock: i64, min_stock: i64) -> Self {
        if available_stock <= 0 {
            StockStatus::OutOfStock
        } else if available_stock <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::Available
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Available => write!(f, "Available"),
            StockStatus::LowStock => write!(f, "Low Stock"),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
        }
    }
}

/// Direction of a stock movement event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Received,
    Consumed,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Received => "received",
            MovementType::Consumed => "consumed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_out_of_stock_at_zero() {
        assert_eq!(StockStatus::derive(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(-1, 5), StockStatus::OutOfStock);
    }

    #[test]
    fn test_status_low_stock_at_threshold() {
        assert_eq!(StockStatus::derive(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(3, 5), StockStatus::LowStock);
    }

    #[test]
    fn test_status_available_above_threshold() {
        assert_eq!(StockStatus::derive(6, 5), StockStatus::Available);
    }

    #[test]
    fn test_role_parse_defaults_to_staff() {
        assert_eq!(StaffRole::parse("admin"), StaffRole::Admin);
        assert_eq!(StaffRole::parse("staff"), StaffRole::Staff);
        assert_eq!(StaffRole::parse("owner"), StaffRole::Staff);
    }
}
