use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campstock_core::{DomainError, DomainResult, Entity, ItemId};

/// Category assigned when a receipt carries a blank category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A trackable inventory good, unique by name.
///
/// `estimated_demand` is a derived aggregate: it mirrors the sum of live
/// allocation quantities referencing this item and is only ever moved through
/// [`Item::reserve_demand`] / [`Item::release_demand`] at allocation mutation
/// sites, never recomputed on read and never set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    estimated_demand: u64,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Register a new item with zero demand.
    ///
    /// The name must be non-blank; a blank category falls back to
    /// [`DEFAULT_CATEGORY`]. Both are trimmed.
    pub fn register(name: &str, category: &str, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("item name cannot be blank"));
        }
        let category = category.trim();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };

        Ok(Self {
            id: ItemId::new(),
            name: name.to_string(),
            category: category.to_string(),
            estimated_demand: 0,
            created_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn estimated_demand(&self) -> u64 {
        self.estimated_demand
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check that a receipt's category matches the registered one.
    ///
    /// An item's category is immutable: the same name cannot be re-registered
    /// under a different category. Comparison is case-sensitive. A blank
    /// requested category compares as [`DEFAULT_CATEGORY`].
    pub fn ensure_category(&self, requested: &str) -> DomainResult<()> {
        let requested = requested.trim();
        let requested = if requested.is_empty() {
            DEFAULT_CATEGORY
        } else {
            requested
        };
        if self.category != requested {
            return Err(DomainError::category_conflict(
                self.name.clone(),
                self.category.clone(),
                requested,
            ));
        }
        Ok(())
    }

    /// Increase estimated demand when an allocation is created or grows.
    pub fn reserve_demand(&mut self, quantity: u64) -> DomainResult<()> {
        self.estimated_demand = self
            .estimated_demand
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invalid_quantity("estimated demand overflow"))?;
        Ok(())
    }

    /// Decrease estimated demand when an allocation is removed.
    ///
    /// Clamped at zero: demand must never go negative, even if a prior
    /// inconsistency left it lower than the allocation being released.
    pub fn release_demand(&mut self, quantity: u64) {
        self.estimated_demand = self.estimated_demand.saturating_sub(quantity);
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}
