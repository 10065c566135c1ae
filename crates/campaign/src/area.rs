use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campstock_core::{AreaId, DomainError, DomainResult, Entity};

/// An organizational area grouping materials (e.g. logistics, kitchen).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    id: AreaId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Area {
    /// Create a new area. The name must be non-blank (trimmed).
    pub fn create(name: &str, created_at: DateTime<Utc>) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("area name cannot be blank"));
        }
        Ok(Self {
            id: AreaId::new(),
            name: name.to_string(),
            created_at,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Area {
    type Id = AreaId;

    fn id(&self) -> AreaId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            Area::create("  ", Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }
}
