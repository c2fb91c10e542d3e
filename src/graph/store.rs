//! Read-only snapshot of a schema's dependency edges.
//!
//! The store keeps the edges in the order the catalog returned them and an
//! index from source object name to the positions of its outgoing edges, so
//! traversals can expand an object without scanning the whole edge list.

use super::edge::Edge;
use ahash::{AHashMap, AHashSet};

/// Immutable, queryable edge collection for one schema.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    outgoing: AHashMap<String, Vec<usize>>,
}

impl EdgeStore {
    /// Build a store from an edge list, preserving its order
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        let mut outgoing: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.name.clone()).or_default().push(i);
        }
        Self { edges, outgoing }
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the store holds no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges whose source is `name`, in catalog order
    pub fn outgoing(&self, name: &str) -> Outgoing<'_> {
        const NONE: &[usize] = &[];
        let indices = self.outgoing.get(name).map(Vec::as_slice).unwrap_or(NONE);
        Outgoing {
            edges: &self.edges,
            indices: indices.iter(),
        }
    }

    /// Type of `name` as recorded on its first outgoing edge.
    ///
    /// Objects that only ever appear as a referenced endpoint have no root
    /// type: they do not participate in the graph as a source.
    pub fn root_type(&self, name: &str) -> Option<&str> {
        self.outgoing(name).next().map(|e| e.object_type.as_str())
    }

    /// Distinct object names touched by any edge, as source or target,
    /// in first-seen order.
    pub fn object_names(&self) -> Vec<String> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut names = Vec::new();
        for edge in &self.edges {
            for name in [edge.name.as_str(), edge.referenced_name.as_str()] {
                if seen.insert(name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

/// Iterator over the outgoing edges of one object.
#[derive(Debug, Clone)]
pub struct Outgoing<'a> {
    edges: &'a [Edge],
    indices: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Outgoing<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<&'a Edge> {
        self.indices.next().map(|&i| &self.edges[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for Outgoing<'_> {}
