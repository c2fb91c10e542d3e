//! Synthetic dependency catalog generator.
//!
//! Produces rows shaped like Oracle's `DBA_DEPENDENCIES` for one schema:
//! views over tables, functions and procedures over views, packages over
//! procedures, triggers on tables. A fixed package/function pair always
//! references each other so every catalog contains a cycle, and shared
//! tables and functions give plenty of diamonds. Rows the analyzer must
//! filter out (system owners, package bodies, foreign owners) are mixed in.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

pub const EXCLUDED_OWNERS: [&str; 3] = ["SYS", "SYSTEM", "PUBLIC"];

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// 8 objects per type
    Small,
    /// 60 objects per type
    Medium,
    /// 400 objects per type
    Large,
}

impl Scale {
    pub fn objects_per_type(&self) -> usize {
        match self {
            Scale::Small => 8,
            Scale::Medium => 60,
            Scale::Large => 400,
        }
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            _ => Err(format!(
                "Unknown scale: {}. Use small, medium, or large",
                s
            )),
        }
    }
}

/// One `DBA_DEPENDENCIES` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub owner: String,
    pub name: String,
    pub object_type: String,
    pub referenced_owner: String,
    pub referenced_name: String,
    pub referenced_type: String,
}

impl CatalogRow {
    /// `(name, type, referenced_name, referenced_type)`
    pub fn edge(&self) -> (&str, &str, &str, &str) {
        (
            self.name.as_str(),
            self.object_type.as_str(),
            self.referenced_name.as_str(),
            self.referenced_type.as_str(),
        )
    }
}

/// A generated catalog for one schema
#[derive(Debug, Clone)]
pub struct GeneratedCatalog {
    pub schema: String,
    pub rows: Vec<CatalogRow>,
}

impl GeneratedCatalog {
    /// Rows the dependency analyzer keeps for this schema, in row order
    pub fn analyzable_rows(&self, include_tables: bool) -> Vec<&CatalogRow> {
        self.rows
            .iter()
            .filter(|r| r.owner == self.schema)
            .filter(|r| !EXCLUDED_OWNERS.contains(&r.referenced_owner.as_str()))
            .filter(|r| r.object_type != "PACKAGE BODY" && r.referenced_type != "PACKAGE BODY")
            .filter(|r| include_tables || (r.object_type != "TABLE" && r.referenced_type != "TABLE"))
            .collect()
    }

    /// Sorted distinct endpoints of the analyzable rows
    pub fn object_names(&self, include_tables: bool) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .analyzable_rows(include_tables)
            .into_iter()
            .flat_map(|r| [r.name.as_str(), r.referenced_name.as_str()])
            .collect();
        names.into_iter().map(String::from).collect()
    }
}

/// Deterministic catalog generator
pub struct Generator {
    rng: ChaCha8Rng,
    scale: Scale,
    schema: String,
    rows: Vec<CatalogRow>,
}

impl Generator {
    pub fn new(seed: u64, scale: Scale) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            scale,
            schema: "APP".to_string(),
            rows: Vec::new(),
        }
    }

    /// Owner of the generated objects (upper-cased)
    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_uppercase();
        self
    }

    pub fn generate(&mut self) -> GeneratedCatalog {
        let n = self.scale.objects_per_type();
        self.rows.clear();

        for i in 0..n {
            let view = object_name("V", i);
            for _ in 0..self.rng.random_range(1..=3) {
                let table = self.pick("T", n);
                self.push(&view, "VIEW", &table, "TABLE");
            }
            if i > 0 && self.rng.random_bool(0.3) {
                let base = object_name("V", self.rng.random_range(0..i));
                self.push(&view, "VIEW", &base, "VIEW");
            }
        }

        for i in 0..n {
            let function = object_name("F", i);
            let table = self.pick("T", n);
            self.push(&function, "FUNCTION", &table, "TABLE");
            if self.rng.random_bool(0.5) {
                let view = self.pick("V", n);
                self.push(&function, "FUNCTION", &view, "VIEW");
            }
            if i > 0 && self.rng.random_bool(0.4) {
                let helper = object_name("F", self.rng.random_range(0..i));
                self.push(&function, "FUNCTION", &helper, "FUNCTION");
            }
            if i % 5 == 0 {
                self.push_foreign(&function, "FUNCTION", "SYS", "STANDARD", "PACKAGE");
            }
        }

        for i in 0..n {
            let procedure = object_name("P", i);
            for _ in 0..self.rng.random_range(1..=3) {
                let (prefix, kind) = match self.rng.random_range(0..3) {
                    0 => ("F", "FUNCTION"),
                    1 => ("V", "VIEW"),
                    _ => ("T", "TABLE"),
                };
                let target = self.pick(prefix, n);
                self.push(&procedure, "PROCEDURE", &target, kind);
            }
            self.push_foreign(&procedure, "PROCEDURE", "SYS", "DBMS_OUTPUT", "PACKAGE");
        }

        for i in 0..n {
            let package = object_name("PKG", i);
            for _ in 0..self.rng.random_range(2..=4) {
                let (prefix, kind) = if self.rng.random_bool(0.5) {
                    ("P", "PROCEDURE")
                } else {
                    ("F", "FUNCTION")
                };
                let target = self.pick(prefix, n);
                self.push(&package, "PACKAGE", &target, kind);
            }
            // Package bodies depend on their package header and on tables.
            self.push(&package, "PACKAGE BODY", &package, "PACKAGE");
            let table = self.pick("T", n);
            self.push(&package, "PACKAGE BODY", &table, "TABLE");
        }

        // Guaranteed cycle: PKG_0000 <-> F_0000
        let (package, function) = (object_name("PKG", 0), object_name("F", 0));
        self.push(&package, "PACKAGE", &function, "FUNCTION");
        self.push(&function, "FUNCTION", &package, "PACKAGE");

        for i in 0..n {
            let trigger = object_name("TRG", i);
            self.push(&trigger, "TRIGGER", &object_name("T", i), "TABLE");
            let procedure = self.pick("P", n);
            self.push(&trigger, "TRIGGER", &procedure, "PROCEDURE");
        }

        for i in 0..n.div_ceil(2) {
            let synonym = object_name("SYN", i);
            let target = object_name("REMOTE_V", i);
            self.push_foreign(&synonym, "SYNONYM", "SHARED", &target, "VIEW");
            self.push_foreign(&synonym, "SYNONYM", "PUBLIC", "DUAL", "SYNONYM");
        }

        // Another owner's objects referencing this schema; filtered by owner.
        for i in 0..n.div_ceil(4) {
            let referenced = object_name("V", i);
            self.rows.push(CatalogRow {
                owner: "REPORTING".to_string(),
                name: object_name("RPT_V", i),
                object_type: "VIEW".to_string(),
                referenced_owner: self.schema.clone(),
                referenced_name: referenced,
                referenced_type: "VIEW".to_string(),
            });
        }

        GeneratedCatalog {
            schema: self.schema.clone(),
            rows: std::mem::take(&mut self.rows),
        }
    }

    fn pick(&mut self, prefix: &str, n: usize) -> String {
        object_name(prefix, self.rng.random_range(0..n))
    }

    fn push(&mut self, name: &str, kind: &str, referenced: &str, referenced_kind: &str) {
        let owner = self.schema.clone();
        self.push_foreign(name, kind, &owner, referenced, referenced_kind);
    }

    fn push_foreign(
        &mut self,
        name: &str,
        kind: &str,
        referenced_owner: &str,
        referenced: &str,
        referenced_kind: &str,
    ) {
        self.rows.push(CatalogRow {
            owner: self.schema.clone(),
            name: name.to_string(),
            object_type: kind.to_string(),
            referenced_owner: referenced_owner.to_string(),
            referenced_name: referenced.to_string(),
            referenced_type: referenced_kind.to_string(),
        });
    }
}

fn object_name(prefix: &str, index: usize) -> String {
    format!("{}_{:04}", prefix, index)
}
