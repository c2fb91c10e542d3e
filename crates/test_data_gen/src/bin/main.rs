//! CLI for generating synthetic dependency catalogs.
//!
//! Usage:
//!   gen-catalog --scale small --seed 42 --schema hr > fixtures/hr.csv
//!   gen-catalog --scale medium --format sql -o seed.sql

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use test_data_gen::{render, Generator, Scale};

#[derive(Parser, Debug)]
#[command(name = "gen-catalog")]
#[command(about = "Generate synthetic DBA_DEPENDENCIES catalogs for dep-analyzer", long_about = None)]
struct Args {
    /// Scale preset: small, medium, large
    #[arg(short, long, default_value = "small")]
    scale: String,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Owner of the generated objects
    #[arg(long, default_value = "APP")]
    schema: String,

    /// Output format: csv, tsv, sql
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// Table name used by the sql format
    #[arg(long, default_value = "dba_dependencies")]
    table: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let scale: Scale = args.scale.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let catalog = Generator::new(args.seed, scale)
        .with_schema(&args.schema)
        .generate();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    match args.format.as_str() {
        "csv" => render::write_delimited(&catalog, ',', &mut out)?,
        "tsv" => render::write_delimited(&catalog, '\t', &mut out)?,
        "sql" => render::write_sql(&catalog, &args.table, 100, &mut out)?,
        other => anyhow::bail!("Unknown format: {}. Use csv, tsv, or sql", other),
    }
    out.flush()?;

    if let Some(path) = &args.output {
        eprintln!("Generated {} rows to {}", catalog.rows.len(), path);
    }
    Ok(())
}
