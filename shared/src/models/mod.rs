//! Domain models for the ASTRA Inventory Platform

mod audit;
mod category;
mod location;
mod product;
mod staff;

pub use audit::*;
pub use category::*;
pub use location::*;
pub use product::*;
pub use staff::*;
