//! Transitive dependency walk with one visited set for the whole run.
//!
//! Every outgoing edge of every expanded object is emitted as a
//! `(referenced_type, referenced_name)` pair; an object is expanded at most
//! once per traversal, which is what bounds the walk on cyclic catalogs.

use super::edge::Edge;
use super::store::{EdgeStore, Outgoing};
use ahash::AHashSet;

/// Lazy depth-first walk over everything reachable from one object.
///
/// Pairs come out in pre-order: an edge is yielded before the dependencies
/// of its target. The iterator is finite and not restartable.
pub struct FlatTraversal<'a> {
    store: &'a EdgeStore,
    visited: AHashSet<&'a str>,
    stack: Vec<Outgoing<'a>>,
}

impl<'a> FlatTraversal<'a> {
    /// Start a traversal at `root`. An unknown root yields nothing.
    pub fn new(store: &'a EdgeStore, root: &'a str) -> Self {
        let mut visited = AHashSet::new();
        visited.insert(root);
        Self {
            store,
            visited,
            stack: vec![store.outgoing(root)],
        }
    }
}

impl<'a> Iterator for FlatTraversal<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some(edge) => {
                    let Edge {
                        referenced_name,
                        referenced_type,
                        ..
                    } = edge;
                    if self.visited.insert(referenced_name.as_str()) {
                        self.stack.push(self.store.outgoing(referenced_name));
                    }
                    return Some((referenced_type.as_str(), referenced_name.as_str()));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
