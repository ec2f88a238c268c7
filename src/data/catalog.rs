//! Ordered registry of tracked objects grouped by orbit type

use std::collections::HashMap;
use std::sync::Arc;

use super::{CatalogError, OrbitType, TrackedObject};

/// Registry of static object attributes.
///
/// Insertion order is preserved both globally and per orbit group; the
/// per-group position is the phase offset input to propagation. Once the
/// catalog is shared (behind an `Arc`) it is never mutated again.
#[derive(Debug, Default, Clone)]
pub struct CatalogStore {
    /// Objects in registration order
    objects: Vec<Arc<TrackedObject>>,
    /// Object id -> index in `objects`
    id_to_idx: HashMap<String, usize>,
    /// Index of each object within its orbit group (parallel to `objects`)
    group_index: Vec<usize>,
    /// Object count per orbit group, by `OrbitType::index`
    group_sizes: [usize; 4],
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already validated objects, skipping duplicates
    pub fn from_objects(objects: impl IntoIterator<Item = TrackedObject>) -> Self {
        let mut catalog = Self::new();
        for obj in objects {
            catalog.register(obj);
        }
        catalog
    }

    /// Register an object.
    ///
    /// Idempotent on id: registering an id that is already present leaves
    /// the catalog untouched and returns `false`.
    pub fn register(&mut self, object: TrackedObject) -> bool {
        if self.id_to_idx.contains_key(&object.id) {
            log::debug!("Ignoring duplicate catalog id {}", object.id);
            return false;
        }

        let group = object.orbit_type.index();
        let idx = self.objects.len();
        self.id_to_idx.insert(object.id.clone(), idx);
        self.group_index.push(self.group_sizes[group]);
        self.group_sizes[group] += 1;
        self.objects.push(Arc::new(object));
        true
    }

    /// Validate, then register
    pub fn try_register(&mut self, object: TrackedObject) -> Result<bool, CatalogError> {
        object.validate()?;
        Ok(self.register(object))
    }

    /// Number of registered objects in the orbit group
    pub fn group_size(&self, orbit_type: OrbitType) -> usize {
        self.group_sizes[orbit_type.index()]
    }

    /// Position of a registered object within its orbit group
    pub fn index_within_group(&self, object: &TrackedObject) -> Option<usize> {
        self.id_to_idx
            .get(&object.id)
            .map(|&idx| self.group_index[idx])
    }

    /// Group index for the object at catalog position `idx`
    pub fn group_index_at(&self, idx: usize) -> Option<usize> {
        self.group_index.get(idx).copied()
    }

    /// All objects in registration order
    pub fn all(&self) -> &[Arc<TrackedObject>] {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&Arc<TrackedObject>> {
        self.id_to_idx.get(id).map(|&idx| &self.objects[idx])
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
