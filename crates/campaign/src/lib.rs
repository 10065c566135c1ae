//! Campaign organization registry: areas and their materials.
//!
//! Materials are the work units that reserve inventory through allocations;
//! the allocation ledger validates material ids against this registry.

pub mod area;
pub mod material;

pub use area::Area;
pub use material::Material;
