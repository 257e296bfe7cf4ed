mod check;
mod completions;
mod generate;
mod paths;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use leafwise_schema::ModuleFilter;
use leafwise_tree::{EntryTree, Modules};
use paths::PathsCommand;

/// Extension trait for exiting on module errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for leafwise_tree::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "lw")]
#[command(version)]
#[command(about = "Generate JSON Schema documents from module definitions")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Paths(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a JSON Schema document from module files
    Generate(GenerateCommand),

    /// Load module files and report problems without writing anything
    Check(CheckCommand),

    /// List the collected schema paths
    Paths(PathsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Input selection shared by the commands that load modules.
#[derive(Args)]
pub struct ModuleArgs {
    /// Module files to load
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Comma-separated list of module name fragments to skip
    #[arg(short, long, value_name = "LIST")]
    pub skip_modules: Option<String>,
}

impl ModuleArgs {
    /// Load every input file and resolve them into one entry tree.
    pub fn load(&self) -> leafwise_tree::Result<EntryTree> {
        let mut modules = Modules::new();
        for file in &self.files {
            modules.read(file)?;
        }
        modules.process()
    }

    pub fn filter(&self) -> ModuleFilter {
        self.skip_modules
            .as_deref()
            .map(ModuleFilter::from_csv)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["lw", "generate", "a.toml", "b.toml"]).unwrap();
        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.modules.files.len(), 2);
        assert_eq!(cmd.outfile, PathBuf::from("schema.json"));
        assert!(cmd.modules.filter().patterns().is_empty());
    }

    #[test]
    fn test_skip_modules_flag() {
        let cli =
            Cli::try_parse_from(["lw", "paths", "-s", "ietf,iana", "a.toml", "--all"]).unwrap();
        let Commands::Paths(cmd) = cli.command else {
            panic!("expected paths");
        };
        assert_eq!(cmd.modules.filter().patterns(), ["ietf", "iana"]);
        assert!(cmd.all);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["lw", "check"]).is_err());
    }
}
