//! In-process transactional store.
//!
//! `State` holds every table plus the unique indexes the storage layer is
//! responsible for enforcing. `Database` wraps one committed `State` behind an
//! `RwLock`: readers share the committed state, and each transaction runs
//! against a clone that replaces the committed state only on success.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use campstock_campaign::{Area, Material};
use campstock_catalog::{Item, Warehouse};
use campstock_core::{
    AllocationId, AreaId, DomainError, DomainResult, Entity, ItemId, MaterialId, StockEntryId,
    WarehouseId,
};
use campstock_ledger::{Allocation, AllocationKey, StockEntry, StockKey};

/// The complete table state of the store.
///
/// Iteration over the `BTreeMap` tables is ordered by id (UUIDv7, so roughly
/// by creation time), which keeps listings deterministic.
#[derive(Debug, Default, Clone)]
pub struct State {
    items: BTreeMap<ItemId, Item>,
    item_names: HashMap<String, ItemId>,
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    warehouse_names: HashMap<String, WarehouseId>,
    stock: BTreeMap<StockEntryId, StockEntry>,
    stock_pairs: HashMap<StockKey, StockEntryId>,
    allocations: BTreeMap<AllocationId, Allocation>,
    allocation_pairs: HashMap<AllocationKey, AllocationId>,
    areas: BTreeMap<AreaId, Area>,
    area_names: HashMap<String, AreaId>,
    materials: BTreeMap<MaterialId, Material>,
}

impl State {
    // ---- items -----------------------------------------------------------

    /// Insert a new item. Item names are unique (case-sensitive).
    pub fn insert_item(&mut self, item: Item) -> DomainResult<ItemId> {
        if self.item_names.contains_key(item.name()) {
            return Err(DomainError::constraint(format!(
                "item name '{}' already exists",
                item.name()
            )));
        }
        let id = item.id();
        self.item_names.insert(item.name().to_string(), id);
        self.items.insert(id, item);
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        self.item_names.get(name).and_then(|id| self.items.get(id))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.item_names.remove(item.name());
        Some(item)
    }

    // ---- warehouses ------------------------------------------------------

    /// Insert a new warehouse. Warehouse names are unique.
    pub fn insert_warehouse(&mut self, warehouse: Warehouse) -> DomainResult<WarehouseId> {
        if self.warehouse_names.contains_key(warehouse.name()) {
            return Err(DomainError::constraint(format!(
                "warehouse name '{}' already exists",
                warehouse.name()
            )));
        }
        let id = warehouse.id();
        self.warehouse_names.insert(warehouse.name().to_string(), id);
        self.warehouses.insert(id, warehouse);
        Ok(id)
    }

    pub fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.warehouses.get(&id)
    }

    pub fn warehouse_by_name(&self, name: &str) -> Option<&Warehouse> {
        self.warehouse_names
            .get(name)
            .and_then(|id| self.warehouses.get(id))
    }

    pub fn warehouses(&self) -> impl Iterator<Item = &Warehouse> {
        self.warehouses.values()
    }

    pub fn remove_warehouse(&mut self, id: WarehouseId) -> Option<Warehouse> {
        let warehouse = self.warehouses.remove(&id)?;
        self.warehouse_names.remove(warehouse.name());
        Some(warehouse)
    }

    // ---- stock ledger ----------------------------------------------------

    /// Insert a new stock row. At most one row per (item, warehouse) pair;
    /// callers accumulate into the existing row instead.
    pub fn insert_stock_entry(&mut self, entry: StockEntry) -> DomainResult<StockEntryId> {
        if self.stock_pairs.contains_key(&entry.key()) {
            return Err(DomainError::constraint(
                "duplicate stock row for (item, warehouse) pair",
            ));
        }
        let id = entry.id();
        self.stock_pairs.insert(entry.key(), id);
        self.stock.insert(id, entry);
        Ok(id)
    }

    pub fn stock_entry_for(&self, key: StockKey) -> Option<&StockEntry> {
        self.stock_pairs.get(&key).and_then(|id| self.stock.get(id))
    }

    pub fn stock_entry_for_mut(&mut self, key: StockKey) -> Option<&mut StockEntry> {
        let id = *self.stock_pairs.get(&key)?;
        self.stock.get_mut(&id)
    }

    pub fn stock_entries(&self) -> impl Iterator<Item = &StockEntry> {
        self.stock.values()
    }

    /// Drop every stock row referencing an item. Returns how many were
    /// removed.
    pub fn remove_stock_for_item(&mut self, item_id: ItemId) -> usize {
        self.remove_stock_where(|entry| entry.item_id() == item_id)
    }

    /// Drop every stock row held at a warehouse. Returns how many were
    /// removed.
    pub fn remove_stock_for_warehouse(&mut self, warehouse_id: WarehouseId) -> usize {
        self.remove_stock_where(|entry| entry.warehouse_id() == warehouse_id)
    }

    fn remove_stock_where(&mut self, predicate: impl Fn(&StockEntry) -> bool) -> usize {
        let doomed: Vec<StockEntryId> = self
            .stock
            .values()
            .filter(|entry| predicate(entry))
            .map(|entry| entry.id())
            .collect();
        for id in &doomed {
            if let Some(entry) = self.stock.remove(id) {
                self.stock_pairs.remove(&entry.key());
            }
        }
        doomed.len()
    }

    // ---- allocation ledger -----------------------------------------------

    /// Insert a new allocation. At most one row per (material, item) pair;
    /// callers accumulate into the existing row instead.
    pub fn insert_allocation(&mut self, allocation: Allocation) -> DomainResult<AllocationId> {
        if self.allocation_pairs.contains_key(&allocation.key()) {
            return Err(DomainError::constraint(
                "duplicate allocation for (material, item) pair",
            ));
        }
        let id = allocation.id();
        self.allocation_pairs.insert(allocation.key(), id);
        self.allocations.insert(id, allocation);
        Ok(id)
    }

    pub fn allocation(&self, id: AllocationId) -> Option<&Allocation> {
        self.allocations.get(&id)
    }

    pub fn allocation_for_mut(&mut self, key: AllocationKey) -> Option<&mut Allocation> {
        let id = *self.allocation_pairs.get(&key)?;
        self.allocations.get_mut(&id)
    }

    pub fn allocations(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.values()
    }

    pub fn allocations_for_material(
        &self,
        material_id: MaterialId,
    ) -> impl Iterator<Item = &Allocation> {
        self.allocations
            .values()
            .filter(move |allocation| allocation.material_id() == material_id)
    }

    pub fn remove_allocation(&mut self, id: AllocationId) -> Option<Allocation> {
        let allocation = self.allocations.remove(&id)?;
        self.allocation_pairs.remove(&allocation.key());
        Some(allocation)
    }

    /// Drop every allocation referencing an item (item-deletion cascade; the
    /// demand aggregate dies with the item). Returns how many were removed.
    pub fn remove_allocations_for_item(&mut self, item_id: ItemId) -> usize {
        let doomed: Vec<AllocationId> = self
            .allocations
            .values()
            .filter(|allocation| allocation.item_id() == item_id)
            .map(|allocation| allocation.id())
            .collect();
        for id in &doomed {
            self.remove_allocation(*id);
        }
        doomed.len()
    }

    // ---- areas and materials ---------------------------------------------

    /// Insert a new area. Area names are unique.
    pub fn insert_area(&mut self, area: Area) -> DomainResult<AreaId> {
        if self.area_names.contains_key(area.name()) {
            return Err(DomainError::constraint(format!(
                "area name '{}' already exists",
                area.name()
            )));
        }
        let id = area.id();
        self.area_names.insert(area.name().to_string(), id);
        self.areas.insert(id, area);
        Ok(id)
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    pub fn remove_area(&mut self, id: AreaId) -> Option<Area> {
        let area = self.areas.remove(&id)?;
        self.area_names.remove(area.name());
        Some(area)
    }

    pub fn insert_material(&mut self, material: Material) -> MaterialId {
        let id = material.id();
        self.materials.insert(id, material);
        id
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn materials_for_area(&self, area_id: AreaId) -> impl Iterator<Item = &Material> {
        self.materials
            .values()
            .filter(move |material| material.area_id() == area_id)
    }

    pub fn remove_material(&mut self, id: MaterialId) -> Option<Material> {
        self.materials.remove(&id)
    }
}

/// Shared handle to the committed store state.
///
/// One logical transaction per engine operation: the writer lock serializes
/// transactions, and a transaction's mutations become visible to readers only
/// when its closure returns `Ok`. Rollback is dropping the working clone.
#[derive(Debug, Default)]
pub struct Database {
    state: RwLock<State>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Run a read-only closure against the committed state.
    pub fn read<T>(&self, f: impl FnOnce(&State) -> T) -> DomainResult<T> {
        let state = self
            .state
            .read()
            .map_err(|_| DomainError::storage("state lock poisoned"))?;
        Ok(f(&state))
    }

    /// Run a closure inside a transaction.
    ///
    /// The closure mutates a clone of the committed state; the clone replaces
    /// the committed state only if the closure returns `Ok`. An `Err` leaves
    /// the committed state untouched, so other callers never observe a
    /// partially-applied multi-step operation.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut State) -> DomainResult<T>) -> DomainResult<T> {
        let mut committed = self
            .state
            .write()
            .map_err(|_| DomainError::storage("state lock poisoned"))?;
        let mut working = committed.clone();
        let value = f(&mut working)?;
        *committed = working;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_item(name: &str) -> Item {
        Item::register(name, "Gear", Utc::now()).unwrap()
    }

    #[test]
    fn duplicate_item_name_violates_constraint() {
        let mut state = State::default();
        state.insert_item(test_item("Rope")).unwrap();

        let err = state.insert_item(test_item("Rope")).unwrap_err();
        assert!(matches!(err, DomainError::ConstraintViolation(_)));
    }

    #[test]
    fn duplicate_stock_pair_violates_constraint() {
        let mut state = State::default();
        let item_id = state.insert_item(test_item("Rope")).unwrap();
        let warehouse_id = state
            .insert_warehouse(Warehouse::provision("Depot").unwrap())
            .unwrap();

        state
            .insert_stock_entry(StockEntry::open(item_id, warehouse_id, 1))
            .unwrap();
        let err = state
            .insert_stock_entry(StockEntry::open(item_id, warehouse_id, 2))
            .unwrap_err();
        assert!(matches!(err, DomainError::ConstraintViolation(_)));
    }

    #[test]
    fn duplicate_allocation_pair_violates_constraint() {
        let mut state = State::default();
        let item_id = state.insert_item(test_item("Rope")).unwrap();
        let material_id = MaterialId::new();

        state
            .insert_allocation(
                Allocation::reserve(material_id, item_id, 1, Utc::now()).unwrap(),
            )
            .unwrap();
        let err = state
            .insert_allocation(
                Allocation::reserve(material_id, item_id, 2, Utc::now()).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::ConstraintViolation(_)));
    }

    #[test]
    fn removing_a_row_frees_its_unique_key() {
        let mut state = State::default();
        let item_id = state.insert_item(test_item("Rope")).unwrap();
        state.remove_item(item_id);

        // The name is free again once the row is gone.
        state.insert_item(test_item("Rope")).unwrap();
    }

    #[test]
    fn failed_transaction_rolls_back_completely() {
        let db = Database::new();
        db.transaction(|state| state.insert_item(test_item("Rope")).map(|_| ()))
            .unwrap();

        let result: DomainResult<()> = db.transaction(|state| {
            state.insert_item(test_item("Tent"))?;
            Err(DomainError::validation("forced failure"))
        });
        assert!(result.is_err());

        let names: Vec<String> = db
            .read(|state| state.items().map(|i| i.name().to_string()).collect())
            .unwrap();
        assert_eq!(names, vec!["Rope".to_string()]);
    }

    #[test]
    fn committed_transaction_is_visible_to_readers() {
        let db = Database::new();
        let item_id = db
            .transaction(|state| state.insert_item(test_item("Rope")))
            .unwrap();

        let found = db.read(|state| state.item(item_id).cloned()).unwrap();
        assert_eq!(found.unwrap().name(), "Rope");
    }
}
