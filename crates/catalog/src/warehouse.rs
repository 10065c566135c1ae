use serde::{Deserialize, Serialize};

use campstock_core::{DomainError, DomainResult, Entity, WarehouseId};

/// A named physical storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
}

impl Warehouse {
    /// Provision a new warehouse. The name must be non-blank (trimmed).
    pub fn provision(name: &str) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("warehouse name cannot be blank"));
        }
        Ok(Self {
            id: WarehouseId::new(),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> WarehouseId {
        self.id
    }
}
