//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use toread_core::CollectionFilter;

#[derive(Parser)]
#[command(name = "toread")]
#[command(
    author,
    version,
    about = "Save links and let an LLM summarize and tag them"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Owner the collections belong to
    #[arg(long, global = true, env = "TOREAD_OWNER", default_value_t = 1)]
    pub owner: i64,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "TOREAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a URL: fetch it, summarize it and tag it
    Add(AddArgs),

    /// List saved collections
    #[command(alias = "ls")]
    List(FilterArgs),

    /// One combined report over matching collections
    Summary(FilterArgs),

    /// List tags in use
    Tags,

    /// Remove a saved collection
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Show how a URL would be classified
    Classify(ClassifyArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// URL to save
    pub url: String,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive text to find in titles and descriptions
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only collections carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> CollectionFilter {
        CollectionFilter {
            keyword: self.search.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Collection id as shown by `list`
    pub id: i64,
}

#[derive(Args)]
pub struct ClassifyArgs {
    pub url: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (API keys masked)
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
