//! Warehouse registry operations.

use campstock_catalog::Warehouse;
use campstock_core::{DomainError, DomainResult, Entity, WarehouseId};

use crate::db::Database;

/// Provision a new warehouse. Names are unique.
pub fn provision(db: &Database, name: &str) -> DomainResult<Warehouse> {
    db.transaction(|state| {
        let warehouse = Warehouse::provision(name)?;
        state.insert_warehouse(warehouse.clone())?;
        tracing::info!(warehouse_id = %warehouse.id(), name = warehouse.name(), "warehouse provisioned");
        Ok(warehouse)
    })
}

/// Remove a warehouse, cascading its stock rows.
pub fn remove(db: &Database, warehouse_id: WarehouseId) -> DomainResult<()> {
    db.transaction(|state| {
        if state.warehouse(warehouse_id).is_none() {
            return Err(DomainError::not_found("warehouse"));
        }
        let stock_rows = state.remove_stock_for_warehouse(warehouse_id);
        state.remove_warehouse(warehouse_id);

        tracing::info!(%warehouse_id, stock_rows, "warehouse removed with cascade");
        Ok(())
    })
}

/// Every warehouse, name ascending.
pub fn list(db: &Database) -> DomainResult<Vec<Warehouse>> {
    db.read(|state| {
        let mut warehouses: Vec<Warehouse> = state.warehouses().cloned().collect();
        warehouses.sort_by(|a, b| a.name().cmp(b.name()));
        warehouses
    })
}
