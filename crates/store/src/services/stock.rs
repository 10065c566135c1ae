//! Stock ledger operations: receipts, item deletion, totals, distribution.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use campstock_catalog::Item;
use campstock_core::{DomainError, DomainResult, Entity, ItemId, WarehouseId};
use campstock_ledger::{StockEntry, StockKey};
use campstock_projection::{consolidated_totals as consolidate, warehouse_totals};

use crate::db::Database;

/// Outcome of a receipt: the item (created or pre-existing) and the stock row
/// the quantity landed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub item: Item,
    pub entry: StockEntry,
}

/// Quantity of one item at one named warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRow {
    pub warehouse: String,
    pub quantity: u64,
}

/// One line of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    /// Consolidated quantity across every warehouse.
    pub total: u64,
    /// Quantity at the selected warehouse, when the listing is filtered.
    pub at_warehouse: Option<u64>,
}

/// Receive a quantity of an item into a warehouse.
///
/// Creates the item on first sight of the name (zero demand); fails with
/// `CategoryConflict` if the name already exists under a different category;
/// accumulates into the unique (item, warehouse) stock row, creating it lazily.
/// This is the only path that increases stock; there is no decrement path.
pub fn receive(
    db: &Database,
    item_name: &str,
    category: &str,
    warehouse_id: WarehouseId,
    quantity: u64,
) -> DomainResult<Receipt> {
    db.transaction(|state| {
        if state.warehouse(warehouse_id).is_none() {
            return Err(DomainError::not_found("warehouse"));
        }

        let item_id = match state.item_by_name(item_name.trim()) {
            Some(existing) => {
                existing.ensure_category(category)?;
                existing.id()
            }
            None => state.insert_item(Item::register(item_name, category, Utc::now())?)?,
        };

        let key = StockKey {
            item_id,
            warehouse_id,
        };
        let entry = match state.stock_entry_for_mut(key) {
            Some(entry) => {
                entry.add(quantity)?;
                entry.clone()
            }
            None => {
                let entry = StockEntry::open(item_id, warehouse_id, quantity);
                state.insert_stock_entry(entry.clone())?;
                entry
            }
        };

        let item = state
            .item(item_id)
            .cloned()
            .ok_or_else(|| DomainError::storage("item row vanished mid-transaction"))?;

        tracing::info!(%item_id, %warehouse_id, quantity, "stock received");

        Ok(Receipt { item, entry })
    })
}

/// Delete an item and cascade every stock row and allocation referencing it.
pub fn delete_item(db: &Database, item_id: ItemId) -> DomainResult<()> {
    db.transaction(|state| {
        if state.item(item_id).is_none() {
            return Err(DomainError::not_found("item"));
        }

        let stock_rows = state.remove_stock_for_item(item_id);
        let allocation_rows = state.remove_allocations_for_item(item_id);
        state.remove_item(item_id);

        tracing::info!(%item_id, stock_rows, allocation_rows, "item deleted with cascade");
        Ok(())
    })
}

/// Per-item totals across every warehouse. Items with no stock rows yield no
/// key; callers treat an absent key as zero.
pub fn consolidated_totals(db: &Database) -> DomainResult<HashMap<ItemId, u64>> {
    db.read(|state| consolidate(state.stock_entries()))
}

/// Per-item totals restricted to one warehouse.
pub fn totals_for_warehouse(
    db: &Database,
    warehouse_id: WarehouseId,
) -> DomainResult<HashMap<ItemId, u64>> {
    db.read(|state| {
        if state.warehouse(warehouse_id).is_none() {
            return Err(DomainError::not_found("warehouse"));
        }
        Ok(warehouse_totals(state.stock_entries(), warehouse_id))
    })?
}

/// Where an item's stock sits: (warehouse name, quantity) pairs, positive
/// quantities only, warehouse name ascending.
pub fn distribution(db: &Database, item_id: ItemId) -> DomainResult<Vec<DistributionRow>> {
    db.read(|state| {
        if state.item(item_id).is_none() {
            return Err(DomainError::not_found("item"));
        }

        let mut rows: Vec<DistributionRow> = state
            .stock_entries()
            .filter(|entry| entry.item_id() == item_id && entry.quantity() > 0)
            .map(|entry| DistributionRow {
                warehouse: state
                    .warehouse(entry.warehouse_id())
                    .map(|w| w.name().to_string())
                    .unwrap_or_default(),
                quantity: entry.quantity(),
            })
            .collect();
        rows.sort_by(|a, b| a.warehouse.cmp(&b.warehouse));
        Ok(rows)
    })?
}

/// The inventory listing: every item with its consolidated total, optionally
/// with the quantity at one selected warehouse, ordered by item name.
pub fn inventory_overview(
    db: &Database,
    warehouse: Option<WarehouseId>,
) -> DomainResult<Vec<OverviewRow>> {
    db.read(|state| {
        if let Some(warehouse_id) = warehouse {
            if state.warehouse(warehouse_id).is_none() {
                return Err(DomainError::not_found("warehouse"));
            }
        }

        let totals = consolidate(state.stock_entries());
        let filtered =
            warehouse.map(|warehouse_id| warehouse_totals(state.stock_entries(), warehouse_id));

        let mut rows: Vec<OverviewRow> = state
            .items()
            .map(|item| OverviewRow {
                item_id: item.id(),
                name: item.name().to_string(),
                category: item.category().to_string(),
                total: totals.get(&item.id()).copied().unwrap_or(0),
                at_warehouse: filtered
                    .as_ref()
                    .map(|map| map.get(&item.id()).copied().unwrap_or(0)),
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    })?
}
