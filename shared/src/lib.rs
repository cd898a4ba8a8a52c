//! Shared types and models for the ASTRA Inventory Platform
//!
//! This crate contains domain models and pure helpers shared between the
//! backend and its tests. It performs no I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
