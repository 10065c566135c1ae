//! Allocation ledger operations and the demand aggregate they maintain.
//!
//! Every mutation here touches two entities (the allocation row and the
//! owning item's estimated demand) and commits them in one transaction.
//! Allocation-without-demand (or the reverse) is never observable.

use chrono::Utc;

use campstock_core::{AllocationId, DomainError, DomainResult, ItemId, MaterialId};
use campstock_ledger::{Allocation, AllocationKey};

use crate::db::Database;

/// Reserve a quantity of an item for a material.
///
/// Accumulates into the unique (material, item) allocation if one exists,
/// creates it otherwise, and increments the item's estimated demand by the
/// same amount.
pub fn allocate(
    db: &Database,
    material_id: MaterialId,
    item_id: ItemId,
    quantity: u64,
) -> DomainResult<Allocation> {
    if quantity == 0 {
        return Err(DomainError::invalid_quantity(
            "reservation quantity must be positive",
        ));
    }

    db.transaction(|state| {
        if state.material(material_id).is_none() {
            return Err(DomainError::not_found("material"));
        }
        if state.item(item_id).is_none() {
            return Err(DomainError::not_found("item"));
        }

        let key = AllocationKey {
            material_id,
            item_id,
        };
        let allocation = match state.allocation_for_mut(key) {
            Some(existing) => {
                existing.accumulate(quantity)?;
                existing.clone()
            }
            None => {
                let allocation = Allocation::reserve(material_id, item_id, quantity, Utc::now())?;
                state.insert_allocation(allocation.clone())?;
                allocation
            }
        };

        state
            .item_mut(item_id)
            .ok_or_else(|| DomainError::storage("item row vanished mid-transaction"))?
            .reserve_demand(quantity)?;

        tracing::info!(%material_id, %item_id, quantity, "allocation reserved");
        Ok(allocation)
    })
}

/// Remove an allocation, releasing its quantity from the item's estimated
/// demand (clamped at zero) in the same transaction.
pub fn deallocate(db: &Database, allocation_id: AllocationId) -> DomainResult<()> {
    db.transaction(|state| {
        let allocation = state
            .remove_allocation(allocation_id)
            .ok_or(DomainError::not_found("allocation"))?;

        // A live allocation's item normally exists; a dangling reference left
        // by prior inconsistency still just drops the row.
        if let Some(item) = state.item_mut(allocation.item_id()) {
            item.release_demand(allocation.quantity());
        }

        tracing::info!(
            %allocation_id,
            item_id = %allocation.item_id(),
            quantity = allocation.quantity(),
            "allocation released"
        );
        Ok(())
    })
}

/// Live allocations of one material, oldest first.
pub fn allocations_for_material(
    db: &Database,
    material_id: MaterialId,
) -> DomainResult<Vec<Allocation>> {
    db.read(|state| {
        if state.material(material_id).is_none() {
            return Err(DomainError::not_found("material"));
        }
        let mut allocations: Vec<Allocation> = state
            .allocations_for_material(material_id)
            .cloned()
            .collect();
        allocations.sort_by_key(Allocation::created_at);
        Ok(allocations)
    })?
}
