//! Idempotent provisioning: warehouse seed and the initial stock snapshot.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use campstock_catalog::{Item, Warehouse};
use campstock_core::{DomainResult, Entity};
use campstock_ledger::StockEntry;

use crate::db::Database;

/// One row of the initial inventory snapshot.
///
/// Estimated demand is deliberately absent: the demand aggregate mirrors live
/// allocations only, so bootstrapped items always start at zero demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: u64,
}

/// Seed the fixed warehouse set, only when the registry is empty.
/// Returns how many warehouses were created (zero on a re-run).
pub fn seed_warehouses(db: &Database, names: &[&str]) -> DomainResult<usize> {
    db.transaction(|state| {
        if state.warehouses().next().is_some() {
            tracing::debug!("warehouse registry already provisioned, seed skipped");
            return Ok(0);
        }
        for name in names {
            state.insert_warehouse(Warehouse::provision(name)?)?;
        }
        tracing::info!(created = names.len(), "warehouse registry seeded");
        Ok(names.len())
    })
}

/// Load the initial stock snapshot, only when the item catalog is empty.
///
/// The full quantity of every record lands in `default_warehouse` (created on
/// demand). One transaction: a bad record rolls the whole load back. Returns
/// how many items were loaded (zero when the catalog already had data).
pub fn load_snapshot<I>(
    db: &Database,
    default_warehouse: &str,
    records: I,
) -> DomainResult<usize>
where
    I: IntoIterator<Item = SnapshotRecord>,
{
    db.transaction(|state| {
        if state.items().next().is_some() {
            tracing::info!("item catalog already populated, snapshot load skipped");
            return Ok(0);
        }

        let warehouse_id = match state.warehouse_by_name(default_warehouse) {
            Some(warehouse) => warehouse.id(),
            None => state.insert_warehouse(Warehouse::provision(default_warehouse)?)?,
        };

        let mut loaded = 0;
        for record in records {
            let item_id = state.insert_item(Item::register(
                &record.name,
                &record.category,
                Utc::now(),
            )?)?;
            state.insert_stock_entry(StockEntry::open(item_id, warehouse_id, record.quantity))?;
            loaded += 1;
        }

        tracing::info!(loaded, warehouse = default_warehouse, "initial snapshot loaded");
        Ok(loaded)
    })
}
