//! DuckDB-backed catalog.
//!
//! The catalog owns its connection: dropping a [`DuckDbCatalog`] closes it,
//! whichever way the command using it finishes.

use super::query::{self, CatalogQuery};
use super::{Catalog, CatalogScope};
use crate::config::{AnalyzerConfig, CatalogSource};
use crate::error::{AnalyzerError, Result};
use crate::graph::Edge;
use duckdb::{params_from_iter, AccessMode, Config, Connection, Row};
use std::path::Path;

/// Dependency catalog stored in (or loaded into) a DuckDB database
pub struct DuckDbCatalog {
    conn: Connection,
    config: AnalyzerConfig,
    target: String,
}

impl DuckDbCatalog {
    /// Open the catalog source named by `config`
    pub fn connect(config: &AnalyzerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AnalyzerError::connection("<config>", e))?;
        let source = config.source()?;
        let target = source.to_string();

        if !source.path().exists() {
            return Err(AnalyzerError::connection(
                &target,
                "catalog file does not exist",
            ));
        }

        let conn = match &source {
            CatalogSource::DuckDb(path) => {
                let flags = Config::default()
                    .access_mode(AccessMode::ReadOnly)
                    .map_err(|e| AnalyzerError::connection(&target, e))?;
                Connection::open_with_flags(path, flags)
                    .map_err(|e| AnalyzerError::connection(&target, e))?
            }
            CatalogSource::Delimited { path, delimiter } => {
                let conn = Connection::open_in_memory()
                    .map_err(|e| AnalyzerError::connection(&target, e))?;
                conn.execute_batch(&delimited_view_sql(
                    &config.dependency_view,
                    path,
                    *delimiter,
                ))
                .map_err(|e| AnalyzerError::connection(&target, e))?;
                conn
            }
        };

        Self::from_connection(conn, config, target)
    }

    /// Wrap an already open connection (e.g. an in-memory test database)
    pub fn from_connection(
        conn: Connection,
        config: &AnalyzerConfig,
        target: impl Into<String>,
    ) -> Result<Self> {
        let target = target.into();

        if let Some(ref limit) = config.memory_limit {
            conn.execute(
                &format!("SET memory_limit = '{}'", limit.replace('\'', "''")),
                [],
            )
            .map_err(|e| AnalyzerError::connection(&target, e))?;
        }

        tracing::info!(catalog = %target, "catalog connection opened");
        Ok(Self {
            conn,
            config: config.clone(),
            target,
        })
    }

    /// Human-readable description of the connected source
    pub fn target(&self) -> &str {
        &self.target
    }

    fn fetch<T, F>(&self, query: &CatalogQuery, decode: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        tracing::debug!(query = query.label, sql = %query.sql, "running catalog query");
        let fail = |e: duckdb::Error| AnalyzerError::query(query.label, e);

        let mut stmt = self.conn.prepare(&query.sql).map_err(fail)?;
        let rows = stmt
            .query_map(params_from_iter(query.params.iter()), decode)
            .map_err(fail)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(fail)?);
        }

        tracing::debug!(query = query.label, rows = out.len(), "catalog query finished");
        Ok(out)
    }
}

impl Catalog for DuckDbCatalog {
    fn dependency_edges(&self, scope: &CatalogScope) -> Result<Vec<Edge>> {
        let query = query::dependency_edges(&self.config, scope);
        self.fetch(&query, |row| {
            Ok(Edge {
                name: row.get(0)?,
                object_type: row.get(1)?,
                referenced_name: row.get(2)?,
                referenced_type: row.get(3)?,
            })
        })
    }

    fn object_names(&self, scope: &CatalogScope) -> Result<Vec<String>> {
        let query = query::object_names(&self.config, scope);
        self.fetch(&query, |row| row.get(0))
    }
}

impl Drop for DuckDbCatalog {
    fn drop(&mut self) {
        tracing::debug!(catalog = %self.target, "catalog connection closed");
    }
}

/// SQL exposing a delimited export as the dependency relation
fn delimited_view_sql(view: &str, path: &Path, delimiter: char) -> String {
    let mut sql = String::new();
    if let Some((schema, _)) = view.rsplit_once('.') {
        sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {};\n", schema));
    }
    sql.push_str(&format!(
        "CREATE VIEW {} AS SELECT * FROM read_csv_auto('{}', delim = '{}', header = true, all_varchar = true);",
        view,
        path.display().to_string().replace('\'', "''"),
        delimiter
    ));
    sql
}
