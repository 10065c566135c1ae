use serde::{Deserialize, Serialize};

use campstock_core::{DomainError, DomainResult, Entity, ItemId, StockEntryId, WarehouseId};

/// Unique pair key of a stock ledger row: at most one entry per
/// (item, warehouse).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub item_id: ItemId,
    pub warehouse_id: WarehouseId,
}

/// Quantity of one item held at one warehouse.
///
/// Quantity is non-negative and only ever grows: receipts accumulate, there is
/// no decrement path in this ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    id: StockEntryId,
    item_id: ItemId,
    warehouse_id: WarehouseId,
    quantity: u64,
}

impl StockEntry {
    /// Open the ledger row for a (item, warehouse) pair with its first
    /// received quantity. Zero is a valid receipt.
    pub fn open(item_id: ItemId, warehouse_id: WarehouseId, quantity: u64) -> Self {
        Self {
            id: StockEntryId::new(),
            item_id,
            warehouse_id,
            quantity,
        }
    }

    pub fn key(&self) -> StockKey {
        StockKey {
            item_id: self.item_id,
            warehouse_id: self.warehouse_id,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Accumulate a received quantity into the row.
    pub fn add(&mut self, quantity: u64) -> DomainResult<()> {
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invalid_quantity("stock quantity overflow"))?;
        Ok(())
    }
}

impl Entity for StockEntry {
    type Id = StockEntryId;

    fn id(&self) -> StockEntryId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn receipts_accumulate() {
        let mut entry = StockEntry::open(ItemId::new(), WarehouseId::new(), 10);
        entry.add(5).unwrap();
        entry.add(0).unwrap();
        assert_eq!(entry.quantity(), 15);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let mut entry = StockEntry::open(ItemId::new(), WarehouseId::new(), u64::MAX - 1);
        let err = entry.add(5).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
        assert_eq!(entry.quantity(), u64::MAX - 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the final quantity equals the sum of all received
        /// quantities; a receipt never overwrites the row.
        #[test]
        fn final_quantity_is_sum_of_receipts(
            first in 0u64..100_000,
            rest in prop::collection::vec(0u64..100_000, 0..32)
        ) {
            let mut entry = StockEntry::open(ItemId::new(), WarehouseId::new(), first);
            for quantity in &rest {
                entry.add(*quantity).unwrap();
            }
            let expected = first + rest.iter().sum::<u64>();
            prop_assert_eq!(entry.quantity(), expected);
        }
    }
}
