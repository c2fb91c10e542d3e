pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod json_schema;
pub mod output;
