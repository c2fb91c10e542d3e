//! DuckDB catalog tests over temporary database files and CSV/TSV exports.

use dep_analyzer::analyzer::DependencyAnalyzer;
use dep_analyzer::catalog::{load_edge_store, Catalog, CatalogScope, DuckDbCatalog};
use dep_analyzer::config::AnalyzerConfig;
use dep_analyzer::graph::{Edge, EdgeStore, ForestGenerator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_data_gen::{render, GeneratedCatalog, Generator, Scale};

fn generated() -> GeneratedCatalog {
    Generator::new(42, Scale::Small).with_schema("hr").generate()
}

fn create_duckdb(dir: &TempDir, catalog: &GeneratedCatalog) -> PathBuf {
    let path = dir.path().join("catalog.duckdb");
    let conn = duckdb::Connection::open(&path).unwrap();
    conn.execute_batch(&render::to_sql(catalog, "dba_dependencies"))
        .unwrap();
    drop(conn);
    path
}

fn config_for(path: &Path) -> AnalyzerConfig {
    AnalyzerConfig {
        database: Some(path.to_path_buf()),
        ..Default::default()
    }
}

fn expected_edges(catalog: &GeneratedCatalog, include_tables: bool) -> Vec<Edge> {
    catalog
        .analyzable_rows(include_tables)
        .into_iter()
        .map(|row| {
            let (n, t, rn, rt) = row.edge();
            Edge::new(n, t, rn, rt)
        })
        .collect()
}

fn sorted(mut edges: Vec<Edge>) -> Vec<(String, String, String, String)> {
    let mut keys: Vec<_> = edges
        .drain(..)
        .map(|e| (e.name, e.object_type, e.referenced_name, e.referenced_type))
        .collect();
    keys.sort();
    keys
}

// =============================================================================
// DuckDB database file
// =============================================================================

#[test]
fn test_duckdb_edges_are_filtered() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let catalog = DuckDbCatalog::connect(&config_for(&create_duckdb(&dir, &generated))).unwrap();
    assert!(catalog.target().starts_with("duckdb:"));

    for include_tables in [false, true] {
        let scope = CatalogScope::new("hr", include_tables).unwrap();
        let edges = catalog.dependency_edges(&scope).unwrap();
        assert_eq!(
            sorted(edges),
            sorted(expected_edges(&generated, include_tables)),
            "include_tables = {}",
            include_tables
        );
    }
}

#[test]
fn test_duckdb_object_enumeration_sorted() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let catalog = DuckDbCatalog::connect(&config_for(&create_duckdb(&dir, &generated))).unwrap();

    let scope = CatalogScope::new("HR", false).unwrap();
    let names = catalog.object_names(&scope).unwrap();
    assert_eq!(names, generated.object_names(false));
    assert!(!names.iter().any(|n| n == "DBMS_OUTPUT"));
    assert!(!names.iter().any(|n| n.starts_with("RPT_")));
}

#[test]
fn test_duckdb_forest_matches_in_memory_store() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let catalog = DuckDbCatalog::connect(&config_for(&create_duckdb(&dir, &generated))).unwrap();
    let analyzer = DependencyAnalyzer::new(&catalog, CatalogScope::new("hr", false).unwrap());

    let forest = analyzer.forest().unwrap();
    let store = EdgeStore::from_edges(expected_edges(&generated, false));
    let expected = ForestGenerator::new(&store)
        .generate(generated.object_names(false))
        .unwrap();

    let names: Vec<&str> = forest.trees().iter().map(|t| t.name.as_str()).collect();
    let expected_names: Vec<&str> = expected.trees().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, expected_names);
    assert_eq!(forest.node_count(), expected.node_count());
}

#[test]
fn test_export_writes_lowercase_file_name() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let catalog = DuckDbCatalog::connect(&config_for(&create_duckdb(&dir, &generated))).unwrap();
    let analyzer = DependencyAnalyzer::new(&catalog, CatalogScope::new("HR", false).unwrap());

    let out = TempDir::new().unwrap();
    let export = analyzer.export(out.path()).unwrap();
    assert_eq!(export.path, out.path().join("hr_dependency.json"));
    assert_eq!(fs::read_to_string(&export.path).unwrap(), export.document);
    assert!(export.nodes >= export.trees);
}

#[test]
fn test_unknown_schema_is_empty_not_error() {
    let dir = TempDir::new().unwrap();
    let catalog = DuckDbCatalog::connect(&config_for(&create_duckdb(&dir, &generated()))).unwrap();
    let analyzer = DependencyAnalyzer::new(&catalog, CatalogScope::new("nobody", false).unwrap());

    assert!(analyzer.list_objects().unwrap().is_empty());
    assert!(analyzer.report("PKG_0000").unwrap().is_empty());
    assert!(analyzer.forest().unwrap_err().is_data_integrity());
}

#[test]
fn test_missing_relation_downgrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let path = create_duckdb(&dir, &generated());
    let config = AnalyzerConfig {
        dependency_view: "no_such_view".to_string(),
        ..config_for(&path)
    };
    let catalog = DuckDbCatalog::connect(&config).unwrap();
    let scope = CatalogScope::new("hr", false).unwrap();

    assert!(catalog.dependency_edges(&scope).unwrap_err().is_query());
    assert!(load_edge_store(&catalog, &scope).unwrap().is_empty());
}

#[test]
fn test_connect_without_database() {
    let err = DuckDbCatalog::connect(&AnalyzerConfig::default())
        .err()
        .unwrap();
    assert!(err.is_connection());
}

// =============================================================================
// Delimited exports
// =============================================================================

#[test]
fn test_csv_export_catalog() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let path = dir.path().join("deps.csv");
    fs::write(&path, render::to_csv(&generated)).unwrap();

    let catalog = DuckDbCatalog::connect(&config_for(&path)).unwrap();
    assert!(catalog.target().starts_with("csv:"));

    let scope = CatalogScope::new("hr", false).unwrap();
    assert_eq!(
        sorted(catalog.dependency_edges(&scope).unwrap()),
        sorted(expected_edges(&generated, false))
    );
    assert_eq!(
        catalog.object_names(&scope).unwrap(),
        generated.object_names(false)
    );
}

#[test]
fn test_tsv_export_catalog() {
    let dir = TempDir::new().unwrap();
    let generated = generated();
    let path = dir.path().join("deps.tsv");
    let mut buf = Vec::new();
    render::write_delimited(&generated, '\t', &mut buf).unwrap();
    fs::write(&path, buf).unwrap();

    let catalog = DuckDbCatalog::connect(&config_for(&path)).unwrap();
    let scope = CatalogScope::new("hr", true).unwrap();
    assert_eq!(
        sorted(catalog.dependency_edges(&scope).unwrap()),
        sorted(expected_edges(&generated, true))
    );
}

#[test]
fn test_mixed_case_catalog_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deps.csv");
    fs::write(
        &path,
        "OWNER,NAME,TYPE,REFERENCED_OWNER,REFERENCED_NAME,REFERENCED_TYPE\n\
         HR,Pkg_Pay,PACKAGE,HR,V_EMP,VIEW\n",
    )
    .unwrap();

    let catalog = DuckDbCatalog::connect(&config_for(&path)).unwrap();
    let analyzer = DependencyAnalyzer::new(&catalog, CatalogScope::new("hr", false).unwrap());
    assert!(analyzer.report("pkg_pay").unwrap_err().is_validation());
    assert!(analyzer.list_objects().unwrap_err().is_validation());
}
