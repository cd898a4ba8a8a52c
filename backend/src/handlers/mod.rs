//! HTTP handlers for the ASTRA Inventory Platform

pub mod audit;
pub mod auth;
pub mod category;
pub mod health;
pub mod inventory;
pub mod location;
pub mod staff;

pub use audit::*;
pub use auth::*;
pub use category::*;
pub use health::*;
pub use inventory::*;
pub use location::*;
pub use staff::*;
