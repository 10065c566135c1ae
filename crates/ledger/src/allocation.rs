use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campstock_core::{AllocationId, DomainError, DomainResult, Entity, ItemId, MaterialId};

/// Unique pair key of an allocation row: at most one allocation per
/// (material, item).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllocationKey {
    pub material_id: MaterialId,
    pub item_id: ItemId,
}

/// A reservation of item quantity by a material.
///
/// Every mutation of an allocation drives a symmetric mutation of the owning
/// item's estimated demand; both must commit in the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    id: AllocationId,
    material_id: MaterialId,
    item_id: ItemId,
    quantity: u64,
    created_at: DateTime<Utc>,
}

impl Allocation {
    /// Reserve an initial quantity. Zero reservations are rejected.
    pub fn reserve(
        material_id: MaterialId,
        item_id: ItemId,
        quantity: u64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        ensure_positive(quantity)?;
        Ok(Self {
            id: AllocationId::new(),
            material_id,
            item_id,
            quantity,
            created_at,
        })
    }

    pub fn key(&self) -> AllocationKey {
        AllocationKey {
            material_id: self.material_id,
            item_id: self.item_id,
        }
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Accumulate a repeat reservation into the existing row.
    pub fn accumulate(&mut self, quantity: u64) -> DomainResult<()> {
        ensure_positive(quantity)?;
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invalid_quantity("allocation quantity overflow"))?;
        Ok(())
    }
}

fn ensure_positive(quantity: u64) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::invalid_quantity(
            "reservation quantity must be positive",
        ));
    }
    Ok(())
}

impl Entity for Allocation {
    type Id = AllocationId;

    fn id(&self) -> AllocationId {
        self.id
    }
}
