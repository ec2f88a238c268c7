//! Filtering for the satellite and debris browsers

use super::{DebrisSize, ObjectClass, OrbitType, RiskLevel, TrackedObject};

/// Filter criteria for object listings.
///
/// Empty lists mean "any".
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against name and origin
    pub query: String,
    pub classes: Vec<ObjectClass>,
    pub orbit_types: Vec<OrbitType>,
    pub risk_levels: Vec<RiskLevel>,
    pub sizes: Vec<DebrisSize>,
}

impl CatalogFilter {
    pub fn satellites() -> Self {
        Self {
            classes: vec![ObjectClass::Satellite],
            ..Self::default()
        }
    }

    pub fn debris() -> Self {
        Self {
            classes: vec![ObjectClass::Debris],
            ..Self::default()
        }
    }

    /// Check if an object matches this filter
    pub fn matches(&self, obj: &TrackedObject) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let in_name = obj.name.to_lowercase().contains(&query);
            let in_origin = obj
                .origin
                .as_deref()
                .is_some_and(|o| o.to_lowercase().contains(&query));
            if !in_name && !in_origin {
                return false;
            }
        }

        if !self.classes.is_empty() && !self.classes.contains(&obj.class) {
            return false;
        }

        if !self.orbit_types.is_empty() && !self.orbit_types.contains(&obj.orbit_type) {
            return false;
        }

        if !self.risk_levels.is_empty() && !self.risk_levels.contains(&obj.risk_level) {
            return false;
        }

        // Size only exists on debris; objects without one never match a size filter
        if !self.sizes.is_empty() {
            match obj.size {
                Some(size) if self.sizes.contains(&size) => {}
                _ => return false,
            }
        }

        true
    }

    /// Keep matching items in input order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: AsRef<TrackedObject>,
    {
        items.iter().filter(|item| self.matches(item.as_ref())).collect()
    }
}

impl AsRef<TrackedObject> for TrackedObject {
    fn as_ref(&self) -> &TrackedObject {
        self
    }
}
