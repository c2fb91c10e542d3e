mod analyze;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dep-analyzer")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(about = "Reconstruct object dependency graphs from a relational catalog", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List objects, look up one object's dependencies, or export the dependency forest
    #[command(name = "dependency-analyzer", visible_alias = "deps")]
    DependencyAnalyzer(analyze::AnalyzeArgs),

    /// Print JSON Schemas of the exported documents
    Schema {
        /// Document name (forest, report, objects); all when omitted
        name: Option<String>,

        /// Write the schema to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List available schema names
        #[arg(long, conflicts_with_all = ["name", "output"])]
        list: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::DependencyAnalyzer(args) => analyze::run(args),
        Commands::Schema { name, output, list } => schema::run(name, output, list),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "dep-analyzer",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from([
            "dep-analyzer",
            "dependency-analyzer",
            "--schemaname",
            "hr",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
