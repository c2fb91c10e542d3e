//! One dependency tree per catalog object, and the exported JSON document.

use super::store::EdgeStore;
use super::tree::{DependencyNode, TreeBuilder};
use crate::error::{AnalyzerError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ordered sequence of dependency trees, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Forest {
    trees: Vec<DependencyNode>,
}

impl Forest {
    pub fn new(trees: Vec<DependencyNode>) -> Self {
        Self { trees }
    }

    pub fn trees(&self) -> &[DependencyNode] {
        &self.trees
    }

    /// Number of trees (root objects)
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Total nodes across all trees
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DependencyNode::node_count).sum()
    }

    /// Find the tree rooted at `name`
    pub fn tree(&self, name: &str) -> Option<&DependencyNode> {
        self.trees.iter().find(|t| t.name == name)
    }

    /// Serialize as a JSON array indented with four spaces
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| AnalyzerError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

/// Runs the tree builder once per enumerated object.
pub struct ForestGenerator<'a> {
    builder: TreeBuilder<'a>,
}

impl<'a> ForestGenerator<'a> {
    pub fn new(store: &'a EdgeStore) -> Self {
        Self {
            builder: TreeBuilder::new(store),
        }
    }

    /// Build a tree for every name in `objects`, keeping enumeration order.
    ///
    /// Objects that are never an edge source produce no tree. An empty
    /// enumeration is a data-integrity failure rather than an empty forest.
    pub fn generate<I, S>(&self, objects: I) -> Result<Forest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut enumerated = 0usize;
        let mut trees = Vec::new();

        for object in objects {
            enumerated += 1;
            if let Some(tree) = self.builder.build(object.as_ref()) {
                trees.push(tree);
            }
        }

        if enumerated == 0 {
            return Err(AnalyzerError::data_integrity(
                "object enumeration is empty; nothing to build a dependency forest from",
            ));
        }

        tracing::debug!(
            objects = enumerated,
            trees = trees.len(),
            "dependency forest generated"
        );
        Ok(Forest::new(trees))
    }
}

/// File name of the exported forest for a schema
pub fn export_file_name(schema: &str) -> String {
    format!("{}_dependency.json", schema.to_lowercase())
}

/// Result of writing a forest document to disk
#[derive(Debug, Clone)]
pub struct ForestExport {
    pub path: PathBuf,
    pub document: String,
    pub trees: usize,
    pub nodes: usize,
}

/// Serialize `forest` and write it to `<dir>/<schema>_dependency.json`
pub fn write_forest(forest: &Forest, schema: &str, dir: &Path) -> Result<ForestExport> {
    let document = forest.to_json()?;
    let path = dir.join(export_file_name(schema));
    fs::write(&path, document.as_bytes())?;
    tracing::info!(path = %path.display(), "dependency forest written");

    Ok(ForestExport {
        path,
        document,
        trees: forest.len(),
        nodes: forest.node_count(),
    })
}
