//! Catalog connection settings.
//!
//! Settings are layered: built-in defaults, then a YAML file, then the
//! `DEP_ANALYZER_DATABASE` environment variable, then command-line flags.
//!
//! ```yaml
//! database: ./catalog.duckdb
//! dependency_view: dba_dependencies
//! excluded_owners: [SYS, SYSTEM, PUBLIC]
//! excluded_types: [PACKAGE BODY]
//! memory_limit: 1GB
//! ```

use crate::error::AnalyzerError;
use crate::graph::PACKAGE_BODY_TYPE;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "dep-analyzer.yaml";

/// Environment variable overriding the catalog database path
pub const DATABASE_ENV: &str = "DEP_ANALYZER_DATABASE";

/// Owners whose objects never appear as dependency targets
const DEFAULT_EXCLUDED_OWNERS: &[&str] = &["SYS", "SYSTEM", "PUBLIC"];

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Catalog source: a DuckDB database file or a CSV/TSV export
    pub database: Option<PathBuf>,
    /// Relation holding the dependency rows
    pub dependency_view: String,
    /// Referenced owners filtered out of every query
    pub excluded_owners: Vec<String>,
    /// Object types filtered out on both edge endpoints
    pub excluded_types: Vec<String>,
    /// DuckDB memory limit (e.g., "1GB")
    pub memory_limit: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            database: None,
            dependency_view: "dba_dependencies".to_string(),
            excluded_owners: DEFAULT_EXCLUDED_OWNERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_types: vec![PACKAGE_BODY_TYPE.to_string()],
            memory_limit: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AnalyzerConfig = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file (explicit path, else `dep-analyzer.yaml` in
    /// `dir` when present, else defaults) and apply the environment override.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "using config file");
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        let env_database = std::env::var_os(DATABASE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(config.with_database(env_database))
    }

    /// Override the database path when `database` is set
    pub fn with_database(mut self, database: Option<PathBuf>) -> Self {
        if database.is_some() {
            self.database = database;
        }
        self
    }

    /// Reject settings that would be spliced into SQL text unsafely
    pub fn validate(&self) -> anyhow::Result<()> {
        let view = &self.dependency_view;
        let valid = view.split('.').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        });
        if !valid {
            anyhow::bail!(
                "Invalid dependency_view '{}': expected an identifier such as dba_dependencies",
                view
            );
        }
        Ok(())
    }

    /// The configured catalog source
    pub fn source(&self) -> Result<CatalogSource, AnalyzerError> {
        let path = self.database.as_deref().ok_or_else(|| {
            AnalyzerError::connection(
                "<unset>",
                format!(
                    "no catalog database configured (use --database, {} or a config file)",
                    DATABASE_ENV
                ),
            )
        })?;
        Ok(CatalogSource::from_path(path))
    }
}

/// Where catalog rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// An existing DuckDB database file, opened read-only
    DuckDb(PathBuf),
    /// A delimited export of the dependency view, loaded in memory
    Delimited { path: PathBuf, delimiter: char },
}

impl CatalogSource {
    /// Detect the source kind from the file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("csv") => CatalogSource::Delimited {
                path: path.to_path_buf(),
                delimiter: ',',
            },
            Some("tsv") => CatalogSource::Delimited {
                path: path.to_path_buf(),
                delimiter: '\t',
            },
            _ => CatalogSource::DuckDb(path.to_path_buf()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            CatalogSource::DuckDb(path) => path,
            CatalogSource::Delimited { path, .. } => path,
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::DuckDb(path) => write!(f, "duckdb:{}", path.display()),
            CatalogSource::Delimited { path, .. } => write!(f, "csv:{}", path.display()),
        }
    }
}
