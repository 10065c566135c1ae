//! `campstock-store` — transactional storage and the engine's operation set.
//!
//! The store keeps all ledger tables behind a single writer lock and commits
//! mutations by snapshot swap, so a failed operation can never leave
//! partially-applied state behind. Unique-pair invariants (item name,
//! warehouse name, (item, warehouse), (material, item)) are enforced inside
//! the insert paths, not by callers.

pub mod bootstrap;
pub mod db;
pub mod services;

pub use db::{Database, State};
