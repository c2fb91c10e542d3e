//! The three analysis modes over one catalog scope.

use crate::catalog::{load_edge_store, load_object_names, normalize_name, Catalog, CatalogScope};
use crate::error::Result;
use crate::graph::{write_forest, DependencyReport, Forest, ForestExport, ForestGenerator};
use std::path::Path;

/// Runs object listing, flat lookups and forest export against a catalog
pub struct DependencyAnalyzer<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    scope: CatalogScope,
}

impl<'a, C: Catalog + ?Sized> DependencyAnalyzer<'a, C> {
    pub fn new(catalog: &'a C, scope: CatalogScope) -> Self {
        Self { catalog, scope }
    }

    pub fn scope(&self) -> &CatalogScope {
        &self.scope
    }

    /// Every object touched by the schema's edges
    pub fn list_objects(&self) -> Result<Vec<String>> {
        load_object_names(self.catalog, &self.scope)
    }

    /// Flat, type-grouped dependencies of one object.
    ///
    /// An unknown object yields an empty report.
    pub fn report(&self, object: &str) -> Result<DependencyReport> {
        let store = load_edge_store(self.catalog, &self.scope)?;
        let object = normalize_name(object);
        let report = DependencyReport::build(&store, &object);
        tracing::debug!(
            object = %object,
            groups = report.groups.len(),
            entries = report.total(),
            "flat traversal finished"
        );
        Ok(report)
    }

    /// One dependency tree per enumerated object
    pub fn forest(&self) -> Result<Forest> {
        let store = load_edge_store(self.catalog, &self.scope)?;
        let objects = load_object_names(self.catalog, &self.scope)?;
        ForestGenerator::new(&store).generate(&objects)
    }

    /// Build the forest and write `<schema>_dependency.json` into `dir`
    pub fn export(&self, dir: &Path) -> Result<ForestExport> {
        let forest = self.forest()?;
        write_forest(&forest, self.scope.schema(), dir)
    }
}
