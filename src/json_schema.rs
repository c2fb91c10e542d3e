//! JSON Schema generation for exported documents.
//!
//! Schemas are generated with schemars and exposed through the `schema`
//! subcommand so downstream tools can validate the forest export.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// All document schemas, keyed by name.
/// BTreeMap keeps the listing order deterministic.
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // generate-json output (<schema>_dependency.json)
    schemas.insert("forest", schema_for!(crate::graph::Forest));

    // --objectname ... --json
    schemas.insert("report", schema_for!(crate::graph::DependencyReport));

    // --list-objects --json
    schemas.insert("objects", schema_for!(crate::output::ObjectListJson));

    schemas
}

/// Generate a single schema by document name
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["forest", "objects", "report"]);
    }

    #[test]
    fn test_forest_schema_is_array() {
        let schema = get_schema("forest").unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "array");
    }

    #[test]
    fn test_unknown_schema() {
        assert!(get_schema("nope").is_none());
    }
}
