use anyhow::{Context, Result};
use dep_analyzer::json_schema;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub fn run(name: Option<String>, output: Option<PathBuf>, list: bool) -> Result<()> {
    if list {
        for name in json_schema::schema_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let document = match name.as_deref() {
        Some(name) => {
            let Some(schema) = json_schema::get_schema(name) else {
                anyhow::bail!(
                    "unknown schema '{}' (available: {})",
                    name,
                    json_schema::schema_names().join(", ")
                );
            };
            serde_json::to_string_pretty(&schema)?
        }
        None => {
            let all: BTreeMap<_, _> = json_schema::all_schemas();
            serde_json::to_string_pretty(&all)?
        }
    };

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", document))
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}
