//! Area and material registry operations.
//!
//! Deleting a material (directly or through its area) drops its allocations;
//! each dropped allocation releases its quantity from the owning item's
//! estimated demand, in the same transaction, so the demand aggregate keeps
//! matching the live allocation rows.

use chrono::Utc;

use campstock_campaign::{Area, Material};
use campstock_core::{AllocationId, AreaId, DomainError, DomainResult, Entity, ItemId, MaterialId};

use crate::db::{Database, State};

/// Create a new area. Names are unique.
pub fn create_area(db: &Database, name: &str) -> DomainResult<Area> {
    db.transaction(|state| {
        let area = Area::create(name, Utc::now())?;
        state.insert_area(area.clone())?;
        tracing::info!(area_id = %area.id(), name = area.name(), "area created");
        Ok(area)
    })
}

/// Every area, name ascending.
pub fn list_areas(db: &Database) -> DomainResult<Vec<Area>> {
    db.read(|state| {
        let mut areas: Vec<Area> = state.areas().cloned().collect();
        areas.sort_by(|a, b| a.name().cmp(b.name()));
        areas
    })
}

/// Delete an area, cascading its materials and their allocations (with
/// demand release).
pub fn delete_area(db: &Database, area_id: AreaId) -> DomainResult<()> {
    db.transaction(|state| {
        if state.area(area_id).is_none() {
            return Err(DomainError::not_found("area"));
        }

        let material_ids: Vec<MaterialId> = state
            .materials_for_area(area_id)
            .map(Material::id)
            .collect();
        for material_id in &material_ids {
            release_allocations_of(state, *material_id);
            state.remove_material(*material_id);
        }
        state.remove_area(area_id);

        tracing::info!(%area_id, materials = material_ids.len(), "area deleted with cascade");
        Ok(())
    })
}

/// Create a new material under an area.
pub fn create_material(db: &Database, area_id: AreaId, name: &str) -> DomainResult<Material> {
    db.transaction(|state| {
        if state.area(area_id).is_none() {
            return Err(DomainError::not_found("area"));
        }
        let material = Material::create(area_id, name, Utc::now())?;
        state.insert_material(material.clone());
        tracing::info!(material_id = %material.id(), %area_id, "material created");
        Ok(material)
    })
}

/// Materials of one area, name ascending.
pub fn materials_for_area(db: &Database, area_id: AreaId) -> DomainResult<Vec<Material>> {
    db.read(|state| {
        if state.area(area_id).is_none() {
            return Err(DomainError::not_found("area"));
        }
        let mut materials: Vec<Material> = state.materials_for_area(area_id).cloned().collect();
        materials.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(materials)
    })?
}

/// Delete a material, cascading its allocations with demand release.
pub fn delete_material(db: &Database, material_id: MaterialId) -> DomainResult<()> {
    db.transaction(|state| {
        if state.material(material_id).is_none() {
            return Err(DomainError::not_found("material"));
        }
        let released = release_allocations_of(state, material_id);
        state.remove_material(material_id);

        tracing::info!(%material_id, allocations = released, "material deleted with cascade");
        Ok(())
    })
}

/// Drop every allocation of a material, releasing each quantity from its
/// item's demand. Returns how many allocations were dropped.
fn release_allocations_of(state: &mut State, material_id: MaterialId) -> usize {
    let doomed: Vec<(AllocationId, ItemId, u64)> = state
        .allocations_for_material(material_id)
        .map(|allocation| {
            (
                allocation.id(),
                allocation.item_id(),
                allocation.quantity(),
            )
        })
        .collect();

    for (allocation_id, item_id, quantity) in &doomed {
        state.remove_allocation(*allocation_id);
        if let Some(item) = state.item_mut(*item_id) {
            item.release_demand(*quantity);
        }
    }
    doomed.len()
}
