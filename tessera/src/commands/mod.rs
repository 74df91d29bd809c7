mod bake;
mod check;
mod completions;
mod deps;

use std::path::{Path, PathBuf};

use bake::BakeCommand;
use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use deps::DepsCommand;
use eyre::Result;
use tessera_pipeline::{Config, ConfigError, Failure, Options};

/// Default config file, used when present.
const CONFIG_FILE: &str = "tessera.toml";

/// Extension trait for exiting on pipeline errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, Failure> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, Box<ConfigError>> {
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
#[command(name = "tessera")]
#[command(version)]
#[command(about = "Compile design token documents for web, iOS and Android")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Deps(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a token document
    Bake(BakeCommand),

    /// Resolve and validate a token document without rendering it
    Check(CheckCommand),

    /// List every file a token document reads
    Deps(DepsCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options shared by every command that runs the pipeline.
#[derive(Args)]
pub(crate) struct PipelineArgs {
    /// Entry token document
    pub entry: PathBuf,

    /// Path to tessera.toml (defaults to ./tessera.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Query string, e.g. "transform=ios&format=scss&theme=dark"
    #[arg(short, long)]
    pub query: Option<String>,
}

impl PipelineArgs {
    /// Build options from the config file, then the query string.
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        if let Some(path) = self.config_path() {
            options = Config::from_file(path).unwrap_or_exit().apply(options);
        }
        if let Some(query) = &self.query {
            options = options.with_query(query);
        }
        options
    }

    fn config_path(&self) -> Option<&Path> {
        match &self.config {
            Some(path) => Some(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                default.is_file().then_some(default)
            }
        }
    }
}
