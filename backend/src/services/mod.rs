//! Business logic services for the ASTRA Inventory Platform

pub mod audit;
pub mod auth;
pub mod category;
pub mod inventory;
pub mod location;
pub mod staff;

pub use audit::AuditLogService;
pub use auth::AuthService;
pub use category::CategoryService;
pub use inventory::InventoryService;
pub use location::LocationService;
pub use staff::StaffService;
