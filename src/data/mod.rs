//! Tracked object data: model, catalog, manifests and filtering

mod catalog;
mod loader;
mod search;
mod seed;
mod tracked_object;

pub use catalog::CatalogStore;
pub use loader::{build_catalog, load_catalog, load_manifest, CatalogManifest};
pub use search::CatalogFilter;
pub use seed::world_manifest;
pub use tracked_object::{
    CatalogError, DebrisSize, ObjectClass, ObjectSpec, OrbitType, RiskLevel, TrackedObject,
};
