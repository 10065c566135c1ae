//! Per-item stock totals, consolidated or restricted to one warehouse.

use std::collections::HashMap;

use campstock_core::{ItemId, WarehouseId};
use campstock_ledger::StockEntry;

/// Sum every item's quantity across all warehouses.
///
/// Items without a single ledger row yield no key; callers treat an absent
/// key as zero, not as an error. Totals saturate rather than wrap.
pub fn consolidated_totals<'a, I>(entries: I) -> HashMap<ItemId, u64>
where
    I: IntoIterator<Item = &'a StockEntry>,
{
    let mut totals = HashMap::new();
    for entry in entries {
        let total: &mut u64 = totals.entry(entry.item_id()).or_default();
        *total = total.saturating_add(entry.quantity());
    }
    totals
}

/// Per-item quantities held at a single warehouse.
pub fn warehouse_totals<'a, I>(entries: I, warehouse_id: WarehouseId) -> HashMap<ItemId, u64>
where
    I: IntoIterator<Item = &'a StockEntry>,
{
    consolidated_totals(
        entries
            .into_iter()
            .filter(|entry| entry.warehouse_id() == warehouse_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn totals_sum_across_warehouses() {
        let item = ItemId::new();
        let w1 = WarehouseId::new();
        let w2 = WarehouseId::new();
        let entries = vec![
            StockEntry::open(item, w1, 10),
            StockEntry::open(item, w2, 5),
        ];

        let totals = consolidated_totals(&entries);
        assert_eq!(totals.get(&item), Some(&15));
    }

    #[test]
    fn item_without_rows_has_no_key() {
        let totals = consolidated_totals(std::iter::empty());
        assert!(totals.get(&ItemId::new()).is_none());
    }

    #[test]
    fn warehouse_filter_restricts_rows() {
        let item = ItemId::new();
        let w1 = WarehouseId::new();
        let w2 = WarehouseId::new();
        let entries = vec![
            StockEntry::open(item, w1, 10),
            StockEntry::open(item, w2, 5),
        ];

        assert_eq!(warehouse_totals(&entries, w1).get(&item), Some(&10));
        assert_eq!(warehouse_totals(&entries, w2).get(&item), Some(&5));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: consolidated totals equal the per-warehouse totals summed
        /// over every warehouse.
        #[test]
        fn consolidation_equals_sum_of_warehouse_totals(
            rows in prop::collection::vec((0usize..6, 0usize..4, 0u64..100_000), 0..64)
        ) {
            let items: Vec<ItemId> = (0..6).map(|_| ItemId::new()).collect();
            let warehouses: Vec<WarehouseId> = (0..4).map(|_| WarehouseId::new()).collect();

            // One entry per (item, warehouse) pair, accumulating duplicates
            // the way the stock ledger does.
            let mut by_pair: HashMap<(usize, usize), u64> = HashMap::new();
            for (item_idx, warehouse_idx, quantity) in rows {
                *by_pair.entry((item_idx, warehouse_idx)).or_default() += quantity;
            }
            let entries: Vec<StockEntry> = by_pair
                .iter()
                .map(|(&(i, w), &quantity)| StockEntry::open(items[i], warehouses[w], quantity))
                .collect();

            let consolidated = consolidated_totals(&entries);

            let mut recombined: HashMap<ItemId, u64> = HashMap::new();
            for warehouse in &warehouses {
                for (item_id, quantity) in warehouse_totals(&entries, *warehouse) {
                    *recombined.entry(item_id).or_default() += quantity;
                }
            }

            prop_assert_eq!(consolidated, recombined);
        }
    }
}
