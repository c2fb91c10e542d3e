//! Render a generated catalog as a CSV export or a SQL seed script.

use crate::generator::{CatalogRow, GeneratedCatalog};
use std::io::{self, Write};

pub const COLUMNS: [&str; 6] = [
    "OWNER",
    "NAME",
    "TYPE",
    "REFERENCED_OWNER",
    "REFERENCED_NAME",
    "REFERENCED_TYPE",
];

fn fields(row: &CatalogRow) -> [&str; 6] {
    [
        row.owner.as_str(),
        row.name.as_str(),
        row.object_type.as_str(),
        row.referenced_owner.as_str(),
        row.referenced_name.as_str(),
        row.referenced_type.as_str(),
    ]
}

fn csv_field(value: &str, delimiter: char) -> String {
    if value.contains(delimiter) || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn sql_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Write a delimited export with a header row
pub fn write_delimited<W: Write>(
    catalog: &GeneratedCatalog,
    delimiter: char,
    out: &mut W,
) -> io::Result<()> {
    let sep = delimiter.to_string();
    writeln!(out, "{}", COLUMNS.join(&sep))?;
    for row in &catalog.rows {
        let line: Vec<String> = fields(row)
            .iter()
            .map(|f| csv_field(f, delimiter))
            .collect();
        writeln!(out, "{}", line.join(&sep))?;
    }
    Ok(())
}

pub fn to_csv(catalog: &GeneratedCatalog) -> String {
    let mut buf = Vec::new();
    write_delimited(catalog, ',', &mut buf).expect("writing to Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write `CREATE TABLE` plus batched `INSERT` statements
pub fn write_sql<W: Write>(
    catalog: &GeneratedCatalog,
    table: &str,
    batch_size: usize,
    out: &mut W,
) -> io::Result<()> {
    let columns: Vec<String> = COLUMNS.iter().map(|c| format!("{} VARCHAR", c)).collect();
    writeln!(out, "CREATE TABLE {} ({});", table, columns.join(", "))?;

    for batch in catalog.rows.chunks(batch_size.max(1)) {
        writeln!(out, "INSERT INTO {} VALUES", table)?;
        for (i, row) in batch.iter().enumerate() {
            let values: Vec<String> = fields(row).iter().map(|f| sql_string(f)).collect();
            let end = if i + 1 == batch.len() { ";" } else { "," };
            writeln!(out, "  ({}){}", values.join(", "), end)?;
        }
    }
    Ok(())
}

pub fn to_sql(catalog: &GeneratedCatalog, table: &str) -> String {
    let mut buf = Vec::new();
    write_sql(catalog, table, 100, &mut buf).expect("writing to Vec cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
