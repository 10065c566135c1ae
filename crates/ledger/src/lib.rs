//! Stock and allocation ledgers.
//!
//! Row types for the two quantity ledgers: `StockEntry` (quantity of one item
//! held at one warehouse) and `Allocation` (quantity of one item reserved by
//! one material). Each row is unique by its pair key; repeat operations
//! accumulate into the existing row instead of creating duplicates.

pub mod allocation;
pub mod stock;

pub use allocation::{Allocation, AllocationKey};
pub use stock::{StockEntry, StockKey};
