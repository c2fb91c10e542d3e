//! Error taxonomy for catalog access and graph export.
//!
//! Command code wraps these in `anyhow` with context; library callers can
//! branch on the `is_*` predicates. "Object not found" is deliberately absent:
//! an object without edges yields an empty report, not an error.

use std::fmt;

/// Result alias used throughout the library.
pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;

/// Failures surfaced by the catalog boundary and the forest exporter.
#[derive(Debug)]
pub enum AnalyzerError {
    /// The catalog database could not be opened or configured.
    Connection { target: String, reason: String },
    /// A metadata query failed or returned rows that could not be decoded.
    Query { query: &'static str, reason: String },
    /// Catalog data violates a naming rule (e.g. mixed-case identifiers).
    Validation { reason: String },
    /// Catalog data is missing where the requested operation requires it.
    DataIntegrity { reason: String },
    /// Writing an export document failed.
    Io(std::io::Error),
    /// Serializing an export document failed.
    Serialization(serde_json::Error),
}

impl AnalyzerError {
    pub fn connection(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        AnalyzerError::Connection {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    pub fn query(query: &'static str, reason: impl fmt::Display) -> Self {
        AnalyzerError::Query {
            query,
            reason: reason.to_string(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        AnalyzerError::Validation {
            reason: reason.into(),
        }
    }

    pub fn data_integrity(reason: impl Into<String>) -> Self {
        AnalyzerError::DataIntegrity {
            reason: reason.into(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, AnalyzerError::Connection { .. })
    }

    pub fn is_query(&self) -> bool {
        matches!(self, AnalyzerError::Query { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalyzerError::Validation { .. })
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, AnalyzerError::DataIntegrity { .. })
    }
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::Connection { target, reason } => {
                write!(f, "failed to connect to catalog '{}': {}", target, reason)
            }
            AnalyzerError::Query { query, reason } => {
                write!(f, "catalog query '{}' failed: {}", query, reason)
            }
            AnalyzerError::Validation { reason } => write!(f, "invalid catalog data: {}", reason),
            AnalyzerError::DataIntegrity { reason } => {
                write!(f, "catalog data integrity failure: {}", reason)
            }
            AnalyzerError::Io(err) => write!(f, "I/O error: {}", err),
            AnalyzerError::Serialization(err) => write!(f, "failed to serialize output: {}", err),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzerError::Io(err) => Some(err),
            AnalyzerError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io(err)
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(AnalyzerError::connection("catalog.duckdb", "missing").is_connection());
        assert!(AnalyzerError::query("dependency edges", "bad row").is_query());
        assert!(AnalyzerError::validation("mixed case").is_validation());
        assert!(AnalyzerError::data_integrity("empty").is_data_integrity());
    }

    #[test]
    fn test_display_includes_context() {
        let err = AnalyzerError::connection("catalog.duckdb", "no such file");
        assert_eq!(
            err.to_string(),
            "failed to connect to catalog 'catalog.duckdb': no such file"
        );

        let err = AnalyzerError::query("object names", "column 0 is NULL");
        assert!(err.to_string().contains("object names"));
        assert!(err.to_string().contains("column 0 is NULL"));
    }

    #[test]
    fn test_io_error_has_source() {
        let err: AnalyzerError = std::io::Error::other("disk full").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
