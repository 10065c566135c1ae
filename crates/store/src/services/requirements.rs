//! The requirement report: consolidated stock vs estimated demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campstock_core::DomainResult;
use campstock_projection::{RequirementRow, consolidated_totals, requirement_rows};

use crate::db::Database;

/// Severity-ranked shortage report over the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<RequirementRow>,
}

/// Build the report from the current catalog and stock ledger. Read-only;
/// nothing is cached between calls.
pub fn requirement_report(db: &Database) -> DomainResult<RequirementReport> {
    let rows = db.read(|state| {
        let totals = consolidated_totals(state.stock_entries());
        requirement_rows(state.items(), &totals)
    })?;

    tracing::debug!(rows = rows.len(), "requirement report built");
    Ok(RequirementReport {
        generated_at: Utc::now(),
        rows,
    })
}
