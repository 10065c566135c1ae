//! Consolidation and requirement projection.
//!
//! Stateless computation over catalog + ledger state: per-item totals across
//! warehouses and the severity-ranked requirement report. Nothing here
//! mutates, and nothing is cached across calls; every result is derived from
//! the rows handed in.

pub mod consolidation;
pub mod requirements;

pub use consolidation::{consolidated_totals, warehouse_totals};
pub use requirements::{RequirementRow, Severity, classify, requirement_rows};
