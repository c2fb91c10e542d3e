//! The `dependency-analyzer` command: list, lookup or export for one schema.

use anyhow::{Context, Result};
use clap::Args;
use dep_analyzer::analyzer::DependencyAnalyzer;
use dep_analyzer::catalog::{CatalogScope, DuckDbCatalog};
use dep_analyzer::config::AnalyzerConfig;
use dep_analyzer::output;
use std::path::{Path, PathBuf};

pub const USAGE_MESSAGE: &str =
    "Please provide --objectname, --list-objects or --generate-json for dependency-analyzer";

/// Analyze object dependencies of one schema in the catalog
#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  dep-analyzer dependency-analyzer --schemaname hr --list-objects --database catalog.duckdb
  dep-analyzer dependency-analyzer --schemaname hr --objectname pkg_payroll
  dep-analyzer dependency-analyzer --schemaname hr --objectname pkg_payroll --json
  dep-analyzer dependency-analyzer --schemaname hr --generate-json --include-table
  DEP_ANALYZER_DATABASE=deps.csv dep-analyzer dependency-analyzer --schemaname hr --list-objects")]
pub struct AnalyzeArgs {
    /// Schema (owner) to analyze; matched case-insensitively
    #[arg(long = "schemaname", value_name = "SCHEMA")]
    pub schema_name: String,

    /// Print the flat, type-grouped dependencies of this object
    #[arg(long = "objectname", value_name = "OBJECT")]
    pub object_name: Option<String>,

    /// List every object appearing in the schema's dependencies
    #[arg(long)]
    pub list_objects: bool,

    /// Write the dependency forest to <schema>_dependency.json
    #[arg(long)]
    pub generate_json: bool,

    /// Keep TABLE objects in the dependency graph
    #[arg(long = "include-table")]
    pub include_table: bool,

    /// Output list and lookup results as JSON
    #[arg(long)]
    pub json: bool,

    /// YAML config file (default: ./dep-analyzer.yaml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog database (.duckdb) or dependency export (.csv, .tsv)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,
}

/// The one active mode of an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    ListObjects,
    Lookup(String),
    GenerateJson,
}

impl AnalyzeArgs {
    /// Resolve the active mode: list, then lookup, then export
    pub fn mode(&self) -> Option<Mode> {
        if self.list_objects {
            Some(Mode::ListObjects)
        } else if let Some(object) = &self.object_name {
            Some(Mode::Lookup(object.clone()))
        } else if self.generate_json {
            Some(Mode::GenerateJson)
        } else {
            None
        }
    }
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let Some(mode) = args.mode() else {
        println!("{}", USAGE_MESSAGE);
        return Ok(());
    };

    let scope = CatalogScope::new(&args.schema_name, args.include_table)?;
    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = AnalyzerConfig::load(args.config.as_deref(), &cwd)?.with_database(args.database);

    let catalog = DuckDbCatalog::connect(&config)?;
    let analyzer = DependencyAnalyzer::new(&catalog, scope);
    dispatch(&analyzer, mode, args.json, &cwd)
}

fn dispatch(
    analyzer: &DependencyAnalyzer<'_, DuckDbCatalog>,
    mode: Mode,
    json: bool,
    cwd: &Path,
) -> Result<()> {
    match mode {
        Mode::ListObjects => {
            let names = analyzer.list_objects()?;
            if json {
                println!(
                    "{}",
                    output::format_object_list_json(analyzer.scope().schema(), &names)
                );
            } else {
                print!("{}", output::format_object_list(&names));
            }
        }
        Mode::Lookup(object) => {
            let report = analyzer.report(&object)?;
            if json {
                println!("{}", output::format_report_json(&report));
                if report.is_empty() {
                    eprintln!("{}", output::not_found_message(&report.object));
                }
            } else {
                print!("{}", output::format_report(&report));
            }
        }
        Mode::GenerateJson => {
            let export = analyzer.export(cwd)?;
            eprintln!("{} trees, {} nodes", export.trees, export.nodes);
            println!(
                "Dependency json file generated successfully: {}",
                export.path.display()
            );
        }
    }
    Ok(())
}
