//! SQL text and bound parameters for the catalog metadata queries.
//!
//! Values (schema, owners, types) are always bound as parameters. Only the
//! relation name is spliced into the text, and it is validated by
//! [`AnalyzerConfig::validate`](crate::config::AnalyzerConfig::validate).

use super::CatalogScope;
use crate::config::AnalyzerConfig;
use crate::graph::TABLE_TYPE;

/// A query plus the parameters to bind, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub label: &'static str,
    pub sql: String,
    pub params: Vec<String>,
}

/// The shared WHERE clause: owner, excluded referenced owners, excluded
/// endpoint types (plus `TABLE` when tables are not requested).
fn filter_clause(config: &AnalyzerConfig, scope: &CatalogScope) -> (String, Vec<String>) {
    let mut params = vec![scope.schema().to_string()];
    let mut clause = String::from("owner = ?");

    if !config.excluded_owners.is_empty() {
        clause.push_str(&format!(
            " AND referenced_owner NOT IN ({})",
            placeholders(config.excluded_owners.len())
        ));
        params.extend(config.excluded_owners.iter().map(|o| o.to_uppercase()));
    }

    let mut excluded_types: Vec<String> = config
        .excluded_types
        .iter()
        .map(|t| t.to_uppercase())
        .collect();
    if !scope.include_tables() {
        excluded_types.push(TABLE_TYPE.to_string());
    }

    if !excluded_types.is_empty() {
        let marks = placeholders(excluded_types.len());
        clause.push_str(&format!(
            " AND \"type\" NOT IN ({marks}) AND referenced_type NOT IN ({marks})"
        ));
        params.extend(excluded_types.iter().cloned());
        params.extend(excluded_types);
    }

    (clause, params)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Every `(name, type) -> (referenced_name, referenced_type)` row of the schema
pub fn dependency_edges(config: &AnalyzerConfig, scope: &CatalogScope) -> CatalogQuery {
    let (clause, params) = filter_clause(config, scope);
    CatalogQuery {
        label: "dependency edges",
        sql: format!(
            "SELECT name, \"type\", referenced_name, referenced_type FROM {} WHERE {}",
            config.dependency_view, clause
        ),
        params,
    }
}

/// Distinct object names appearing on either side of the schema's edges
pub fn object_names(config: &AnalyzerConfig, scope: &CatalogScope) -> CatalogQuery {
    let (clause, params) = filter_clause(config, scope);
    let view = &config.dependency_view;
    let mut both = params.clone();
    both.extend(params);
    CatalogQuery {
        label: "object names",
        sql: format!(
            "SELECT DISTINCT name FROM (\
             SELECT name FROM {view} WHERE {clause} \
             UNION ALL \
             SELECT referenced_name AS name FROM {view} WHERE {clause}\
             ) ORDER BY name"
        ),
        params: both,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(include_tables: bool) -> CatalogScope {
        CatalogScope::new("hr", include_tables).unwrap()
    }

    #[test]
    fn test_edge_query_excludes_tables_by_default() {
        let query = dependency_edges(&AnalyzerConfig::default(), &scope(false));
        assert!(query.sql.starts_with("SELECT name, \"type\", referenced_name"));
        assert!(query.sql.contains("FROM dba_dependencies WHERE owner = ?"));
        assert_eq!(query.sql.matches('?').count(), query.params.len());
        assert_eq!(
            query.params,
            vec![
                "HR",
                "SYS",
                "SYSTEM",
                "PUBLIC",
                "PACKAGE BODY",
                "TABLE",
                "PACKAGE BODY",
                "TABLE"
            ]
        );
    }

    #[test]
    fn test_edge_query_with_tables() {
        let query = dependency_edges(&AnalyzerConfig::default(), &scope(true));
        assert!(!query.params.contains(&"TABLE".to_string()));
        assert_eq!(query.sql.matches('?').count(), query.params.len());
    }

    #[test]
    fn test_no_exclusions() {
        let config = AnalyzerConfig {
            excluded_owners: vec![],
            excluded_types: vec![],
            ..Default::default()
        };
        let query = dependency_edges(&config, &scope(true));
        assert!(query.sql.ends_with("WHERE owner = ?"));
        assert_eq!(query.params, vec!["HR"]);
    }

    #[test]
    fn test_object_names_binds_both_branches() {
        let query = object_names(&AnalyzerConfig::default(), &scope(false));
        assert!(query.sql.contains("UNION ALL"));
        assert!(query.sql.ends_with("ORDER BY name"));
        assert_eq!(query.sql.matches('?').count(), query.params.len());
        assert_eq!(query.params.len(), 16);
    }
}
