//! Engine operations, one module per concern.
//!
//! Every operation takes an explicit `&Database` handle and runs as a single
//! transaction (mutations) or a single read (queries); all validation happens
//! before any mutation.

pub mod allocations;
pub mod campaign;
pub mod requirements;
pub mod stock;
pub mod warehouses;
