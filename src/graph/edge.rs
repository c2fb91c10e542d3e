//! A single dependency relation between two catalog objects.

use serde::{Deserialize, Serialize};

/// Object type of plain storage tables in the catalog.
pub const TABLE_TYPE: &str = "TABLE";

/// Object type of package bodies, excluded from catalog queries by default.
pub const PACKAGE_BODY_TYPE: &str = "PACKAGE BODY";

/// "Object `name` of `object_type` depends on `referenced_name` of
/// `referenced_type`."
///
/// Self-edges and cycles are legal catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub referenced_name: String,
    pub referenced_type: String,
}

impl Edge {
    pub fn new(
        name: impl Into<String>,
        object_type: impl Into<String>,
        referenced_name: impl Into<String>,
        referenced_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            object_type: object_type.into(),
            referenced_name: referenced_name.into(),
            referenced_type: referenced_type.into(),
        }
    }

    /// Check if the edge points back at its own source object
    pub fn is_self_reference(&self) -> bool {
        self.name == self.referenced_name
    }

    /// Check if either endpoint is a plain table
    pub fn touches_table(&self) -> bool {
        is_table_type(&self.object_type) || is_table_type(&self.referenced_type)
    }
}

/// Check if an object type names a plain storage table.
///
/// Exact match, the same comparison the catalog query's `NOT IN` applies.
pub fn is_table_type(object_type: &str) -> bool {
    object_type == TABLE_TYPE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_reference() {
        assert!(Edge::new("PKG_A", "PACKAGE", "PKG_A", "PACKAGE").is_self_reference());
        assert!(!Edge::new("PKG_A", "PACKAGE", "PKG_B", "PACKAGE").is_self_reference());
    }

    #[test]
    fn test_touches_table() {
        assert!(Edge::new("V_ORDERS", "VIEW", "ORDERS", "TABLE").touches_table());
        assert!(Edge::new("ORDERS", "TABLE", "SEQ", "SEQUENCE").touches_table());
        assert!(!Edge::new("V_ORDERS", "VIEW", "F_TOTAL", "FUNCTION").touches_table());
    }

    #[test]
    fn test_table_type_is_case_sensitive() {
        assert!(is_table_type("TABLE"));
        assert!(!is_table_type("table"));
        assert!(!is_table_type("Table"));
        assert!(!Edge::new("ORDERS", "table", "SEQ", "SEQUENCE").touches_table());
    }

    #[test]
    fn test_serializes_type_field() {
        let edge = Edge::new("P", "PROCEDURE", "F", "FUNCTION");
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains("\"type\":\"PROCEDURE\""));
    }
}
