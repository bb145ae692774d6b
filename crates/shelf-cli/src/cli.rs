//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Browse an asset catalog: filter, sort and page through a CSV export.
#[derive(Debug, Parser)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Filter, sort and page through an asset catalog")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML engine configuration
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// When to style output
    #[arg(long, value_enum, default_value_t = OutputMode::Auto, global = true)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one page of matching records
    List(ListArgs),

    /// Show the category and license choices in a catalog
    Options(SourceArgs),
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Catalog file (CSV with Name, Link, Category, License, Tags columns)
    #[arg(value_name = "CATALOG")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exact category, case-insensitive
    #[arg(long)]
    pub category: Option<String>,

    /// Exact license, case-insensitive
    #[arg(long)]
    pub license: Option<String>,

    /// Substring of the name, case-insensitive
    #[arg(long)]
    pub name: Option<String>,

    /// Tags that must all appear, separated by commas or spaces
    #[arg(long)]
    pub tags: Option<String>,

    /// Column to sort by; repeat to toggle direction (e.g. --sort Name --sort Name)
    #[arg(long, value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Page to show, clamped to the available range
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Style when writing to a terminal
    Auto,
    /// Always style
    Term,
    /// Never style
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
