//! Catalog access: where dependency edges and object names come from.
//!
//! The [`Catalog`] trait is the seam between the graph logic and the
//! metadata store. [`load_edge_store`] and [`load_object_names`] form the
//! query boundary: query failures are logged and downgraded to empty
//! results, while validation failures propagate.

mod duckdb;
pub mod query;

pub use self::duckdb::DuckDbCatalog;
pub use query::CatalogQuery;

use crate::error::{AnalyzerError, Result};
use crate::graph::{Edge, EdgeStore};

/// Schema being analyzed plus the table-inclusion flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogScope {
    schema: String,
    include_tables: bool,
}

impl CatalogScope {
    /// Normalize the schema name to upper case; blank names are rejected
    pub fn new(schema: &str, include_tables: bool) -> Result<Self> {
        let schema = normalize_name(schema);
        if schema.is_empty() {
            return Err(AnalyzerError::validation("schema name must not be empty"));
        }
        Ok(Self {
            schema,
            include_tables,
        })
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn include_tables(&self) -> bool {
        self.include_tables
    }
}

/// Upper-case a user-supplied schema or object name for catalog matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A metadata store that can list a schema's dependency edges.
pub trait Catalog {
    /// Every dependency edge of the scope, in catalog order
    fn dependency_edges(&self, scope: &CatalogScope) -> Result<Vec<Edge>>;

    /// Distinct names appearing as either endpoint of the scope's edges
    fn object_names(&self, scope: &CatalogScope) -> Result<Vec<String>>;
}

/// Reject identifiers that are not stored in upper case.
///
/// Names from the command line are upper-cased before matching, so a
/// mixed-case catalog identifier could never be matched reliably.
pub fn check_identifier(name: &str) -> Result<()> {
    if name != name.to_uppercase() {
        return Err(AnalyzerError::validation(format!(
            "identifier '{}' is not upper case; mixed-case catalogs are not supported",
            name
        )));
    }
    Ok(())
}

fn validate_edges(edges: &[Edge]) -> Result<()> {
    for edge in edges {
        check_identifier(&edge.name)?;
        check_identifier(&edge.referenced_name)?;
    }
    Ok(())
}

/// Fetch the scope's edges into an [`EdgeStore`].
///
/// A failed query yields an empty store so callers report "not found"
/// instead of aborting.
pub fn load_edge_store<C: Catalog + ?Sized>(catalog: &C, scope: &CatalogScope) -> Result<EdgeStore> {
    let edges = match catalog.dependency_edges(scope) {
        Ok(edges) => edges,
        Err(err) if err.is_query() => {
            tracing::warn!(schema = scope.schema(), "{}", err);
            Vec::new()
        }
        Err(err) => return Err(err),
    };
    validate_edges(&edges)?;

    let mut edges = edges;
    if !scope.include_tables() {
        edges.retain(|e| !e.touches_table());
    }
    tracing::debug!(
        schema = scope.schema(),
        edges = edges.len(),
        self_references = edges.iter().filter(|e| e.is_self_reference()).count(),
        "edge store loaded"
    );
    Ok(EdgeStore::from_edges(edges))
}

/// Fetch the scope's object enumeration; a failed query yields no names
pub fn load_object_names<C: Catalog + ?Sized>(
    catalog: &C,
    scope: &CatalogScope,
) -> Result<Vec<String>> {
    let names = match catalog.object_names(scope) {
        Ok(names) => names,
        Err(err) if err.is_query() => {
            tracing::warn!(schema = scope.schema(), "{}", err);
            Vec::new()
        }
        Err(err) => return Err(err),
    };
    for name in &names {
        check_identifier(name)?;
    }
    Ok(names)
}
