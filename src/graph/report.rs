//! Type-grouped summary of a flat traversal.

use super::flat::FlatTraversal;
use super::store::EdgeStore;
use ahash::{AHashMap, AHashSet};
use schemars::JsonSchema;
use serde::Serialize;

/// Distinct objects of one type reachable from the report's root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DependencyGroup {
    #[serde(rename = "type")]
    pub object_type: String,
    pub count: usize,
    pub names: Vec<String>,
}

/// Everything an object depends on, transitively, grouped by object type.
///
/// Groups are ordered by the first time their type was reached and names
/// keep their first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DependencyReport {
    pub object: String,
    pub groups: Vec<DependencyGroup>,
}

impl DependencyReport {
    /// Run a flat traversal from `object` and group what it emits
    pub fn build(store: &EdgeStore, object: &str) -> Self {
        Self::from_pairs(object, FlatTraversal::new(store, object))
    }

    /// Group `(type, name)` pairs, dropping repeated names within a type
    pub fn from_pairs<'a, I>(object: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut positions: AHashMap<&str, usize> = AHashMap::new();
        let mut seen: AHashSet<(&str, &str)> = AHashSet::new();
        let mut groups: Vec<DependencyGroup> = Vec::new();

        for (object_type, name) in pairs {
            if !seen.insert((object_type, name)) {
                continue;
            }
            let idx = *positions.entry(object_type).or_insert_with(|| {
                groups.push(DependencyGroup {
                    object_type: object_type.to_string(),
                    count: 0,
                    names: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[idx];
            group.names.push(name.to_string());
            group.count = group.names.len();
        }

        Self {
            object: object.to_string(),
            groups,
        }
    }

    /// Check if nothing was reachable (unknown object or no outgoing edges)
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up the group for one object type
    pub fn group(&self, object_type: &str) -> Option<&DependencyGroup> {
        self.groups.iter().find(|g| g.object_type == object_type)
    }

    /// Total distinct `(type, name)` entries across all groups
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}
