//! Synthetic dependency catalogs for dep-analyzer tests and benchmarks.
//!
//! # Example
//!
//! ```rust
//! use test_data_gen::{render, Generator, Scale};
//!
//! let catalog = Generator::new(42, Scale::Small).with_schema("hr").generate();
//! let csv = render::to_csv(&catalog);
//! assert!(csv.starts_with("OWNER,NAME,TYPE"));
//! ```

pub mod generator;
pub mod render;

pub use generator::{CatalogRow, GeneratedCatalog, Generator, Scale, EXCLUDED_OWNERS};
