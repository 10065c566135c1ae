use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campstock_core::{AreaId, DomainError, DomainResult, Entity, MaterialId};

/// A work unit belonging to an area. Materials reserve inventory items
/// through the allocation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    id: MaterialId,
    area_id: AreaId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Material {
    /// Create a new material under an area. The name must be non-blank.
    pub fn create(area_id: AreaId, name: &str, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("material name cannot be blank"));
        }
        Ok(Self {
            id: MaterialId::new(),
            area_id,
            name: name.to_string(),
            created_at,
        })
    }

    pub fn area_id(&self) -> AreaId {
        self.area_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> MaterialId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_belongs_to_its_area() {
        let area_id = AreaId::new();
        let material = Material::create(area_id, "First aid kits", Utc::now()).unwrap();
        assert_eq!(material.area_id(), area_id);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            Material::create(AreaId::new(), "", Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }
}
