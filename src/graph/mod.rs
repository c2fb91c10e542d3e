//! Dependency graph construction over catalog edges.
//!
//! This module provides:
//! - An immutable edge snapshot with an outgoing-edge index
//! - Flat transitive traversal (one visited set per run), grouped by type
//! - Nested dependency trees (cycle breaking per branch)
//! - Forest generation and JSON export for a whole schema

pub mod edge;
pub mod flat;
pub mod forest;
pub mod report;
pub mod store;
pub mod tree;

pub use edge::{is_table_type, Edge, PACKAGE_BODY_TYPE, TABLE_TYPE};
pub use flat::FlatTraversal;
pub use forest::{export_file_name, write_forest, Forest, ForestExport, ForestGenerator};
pub use report::{DependencyGroup, DependencyReport};
pub use store::{EdgeStore, Outgoing};
pub use tree::{DependencyNode, TreeBuilder};
