//! Item catalog and warehouse registry.
//!
//! This crate contains the trackable-good and storage-location entities with
//! their validation rules, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod item;
pub mod warehouse;

pub use item::{DEFAULT_CATEGORY, Item};
pub use warehouse::Warehouse;
