//! Database models for the ASTRA Inventory Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
