//! Nested dependency trees with per-branch cycle breaking.
//!
//! Unlike [`FlatTraversal`](super::FlatTraversal), an object is only
//! suppressed when it already appears among its own ancestors. Siblings do
//! not share that state, so an object reachable along two paths is fully
//! expanded under both of them.

use super::edge::Edge;
use super::store::{EdgeStore, Outgoing};
use ahash::AHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One object in a dependency tree.
///
/// `count` always equals `dependencies.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyNode {
    /// `NAME+TYPE`
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub count: usize,
    pub dependencies: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Create a leaf node
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        let name = name.into();
        let object_type = object_type.into();
        Self {
            id: Self::node_id(&name, &object_type),
            name,
            object_type,
            count: 0,
            dependencies: Vec::new(),
        }
    }

    /// Node identifier derived from name and type
    pub fn node_id(name: &str, object_type: &str) -> String {
        format!("{}+{}", name, object_type)
    }

    /// Direct child with the given name
    pub fn child(&self, name: &str) -> Option<&DependencyNode> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Visit every node in pre-order together with its depth (root = 0)
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&DependencyNode, usize),
    {
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            for child in node.dependencies.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    /// Total number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        let mut total = 0;
        self.walk(|_, _| total += 1);
        total
    }

    /// Length of the longest root-to-leaf path, counted in edges
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.walk(|_, depth| max = max.max(depth));
        max
    }
}

/// A node under construction plus the edges still to expand beneath it.
struct Frame<'a> {
    node: DependencyNode,
    pending: Outgoing<'a>,
}

impl<'a> Frame<'a> {
    fn new(store: &'a EdgeStore, name: &str, object_type: &str) -> Self {
        Self {
            node: DependencyNode::new(name, object_type),
            pending: store.outgoing(name),
        }
    }

    fn for_edge(store: &'a EdgeStore, edge: &Edge) -> Self {
        Self::new(store, &edge.referenced_name, &edge.referenced_type)
    }
}

/// Builds [`DependencyNode`] trees from an [`EdgeStore`].
///
/// Construction uses an explicit work stack, so tree depth is bounded by
/// heap memory rather than the call stack.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    store: &'a EdgeStore,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(store: &'a EdgeStore) -> Self {
        Self { store }
    }

    /// Build the tree rooted at `name`.
    ///
    /// Returns `None` when `name` is not the source of any edge. The root's
    /// type is taken from its first outgoing edge.
    pub fn build(&self, name: &str) -> Option<DependencyNode> {
        let object_type = self.store.root_type(name)?;
        self.expand(name, object_type)
    }

    fn expand(&self, name: &str, object_type: &str) -> Option<DependencyNode> {
        // Names of the frames currently on the stack: the ancestors of
        // whatever is expanded next, plus itself.
        let mut path: AHashSet<&str> = AHashSet::new();
        path.insert(name);

        let mut stack = vec![Frame::new(self.store, name, object_type)];
        let mut root = None;

        while let Some(frame) = stack.last_mut() {
            if let Some(edge) = frame.pending.next() {
                // An ancestor with this name: the branch ends here.
                if path.insert(edge.referenced_name.as_str()) {
                    stack.push(Frame::for_edge(self.store, edge));
                }
                continue;
            }

            if let Some(mut done) = stack.pop() {
                path.remove(done.node.name.as_str());
                done.node.count = done.node.dependencies.len();
                match stack.last_mut() {
                    Some(parent) => parent.node.dependencies.push(done.node),
                    None => root = Some(done.node),
                }
            }
        }

        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(edges: &[(&str, &str)]) -> EdgeStore {
        EdgeStore::from_edges(
            edges
                .iter()
                .map(|(from, to)| Edge::new(*from, "VIEW", *to, "VIEW"))
                .collect(),
        )
    }

    #[test]
    fn test_node_id() {
        let node = DependencyNode::new("PKG_BILLING", "PACKAGE");
        assert_eq!(node.id, "PKG_BILLING+PACKAGE");
    }

    #[test]
    fn test_linear_chain() {
        let store = store(&[("A", "B"), ("B", "C")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();

        assert_eq!(tree.count, 1);
        let b = tree.child("B").unwrap();
        assert_eq!(b.count, 1);
        let c = b.child("C").unwrap();
        assert_eq!(c.count, 0);
        assert!(c.dependencies.is_empty());
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_target_only_object_has_no_tree() {
        let store = store(&[("A", "B")]);
        assert!(TreeBuilder::new(&store).build("B").is_none());
        assert!(TreeBuilder::new(&store).build("MISSING").is_none());
    }

    #[test]
    fn test_self_loop_is_truncated() {
        let store = store(&[("A", "A"), ("A", "B")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();
        assert_eq!(tree.count, 1);
        assert_eq!(tree.dependencies[0].name, "B");
    }

    #[test]
    fn test_cycle_truncated_per_branch() {
        let store = store(&[("A", "B"), ("B", "A")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();
        assert_eq!(tree.count, 1);
        let b = tree.child("B").unwrap();
        assert_eq!(b.count, 0);
    }

    #[test]
    fn test_diamond_expanded_in_both_branches() {
        let store = store(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();

        for via in ["B", "C"] {
            let d = tree.child(via).unwrap().child("D").unwrap();
            assert_eq!(d.count, 1);
            assert_eq!(d.dependencies[0].name, "E");
        }
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_children_keep_edge_order() {
        let store = store(&[("A", "Z"), ("A", "M"), ("A", "B")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();
        let names: Vec<&str> = tree.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "M", "B"]);
    }

    #[test]
    fn test_walk_is_preorder() {
        let store = store(&[("A", "B"), ("B", "C"), ("A", "D")]);
        let tree = TreeBuilder::new(&store).build("A").unwrap();
        let mut seen = Vec::new();
        tree.walk(|node, depth| seen.push((node.name.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 1),
                ("C".to_string(), 2),
                ("D".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_long_chain_builds_iteratively() {
        let names: Vec<String> = (0..2_000).map(|i| format!("OBJ_{}", i)).collect();
        let edges = names
            .windows(2)
            .map(|w| Edge::new(&w[0], "VIEW", &w[1], "VIEW"))
            .collect();
        let store = EdgeStore::from_edges(edges);
        let tree = TreeBuilder::new(&store).build("OBJ_0").unwrap();
        assert_eq!(tree.depth(), 1_999);
    }
}
